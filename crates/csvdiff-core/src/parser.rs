//! CSV parser producing text-only tables
//!
//! Every field is kept verbatim as a string; there is no numeric coercion,
//! so values like zip codes and IDs survive unchanged. An empty field is
//! read as an absent/null cell.

use crate::error::{Error, Result};
use crate::table::{Column, Row, Table};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse a CSV file into a Table
pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    parse_from_reader(reader, path)
}

/// Parse CSV from a string (useful for testing and for in-memory uploads)
pub fn parse_csv_str(content: &str, source_name: &str) -> Result<Table> {
    parse_from_reader(content.as_bytes(), Path::new(source_name))
}

fn parse_from_reader<R: std::io::Read>(reader: R, path: &Path) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Allow varying number of fields
        .from_reader(reader);

    // Parse headers into columns
    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.to_string(), i))
        .collect();

    if columns.is_empty() {
        return Err(Error::MalformedInput {
            path: path.to_path_buf(),
            message: "no header row found in CSV".to_string(),
        });
    }

    // Parse rows
    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut cells: Vec<Option<String>> = record.iter().map(parse_cell).collect();

        // Pad missing trailing fields with null
        while cells.len() < columns.len() {
            cells.push(None);
        }

        // Warn if row is longer than header (truncate)
        if cells.len() > columns.len() {
            eprintln!(
                "Warning: row {} in {} has more cells than columns, truncating",
                row_idx + 1,
                path.display()
            );
            cells.truncate(columns.len());
        }

        rows.push(Row::new(cells));
    }

    Ok(Table { columns, rows })
}

/// An empty field is an absent/null cell; anything else is kept verbatim
fn parse_cell(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let csv = "id,name,value\n1,foo,100\n2,bar,200\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.columns[0].name, "id");
        assert_eq!(table.columns[1].name, "name");
        assert_eq!(table.columns[2].name, "value");

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(0, 0), Some("1"));
        assert_eq!(table.cell(1, 1), Some("bar"));
    }

    #[test]
    fn test_parse_empty_fields_are_null() {
        let csv = "id,name,value\n1,,100\n2,bar,\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.rows[0].cells[1], None);
        assert_eq!(table.rows[1].cells[2], None);
    }

    #[test]
    fn test_parse_no_numeric_coercion() {
        let csv = "zip,id\n02134,007\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.cell(0, 0), Some("02134"));
        assert_eq!(table.cell(0, 1), Some("007"));
    }

    #[test]
    fn test_parse_short_row_padded() {
        let csv = "a,b,c\n1,2\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.rows[0].cells.len(), 3);
        assert_eq!(table.rows[0].cells[2], None);
    }

    #[test]
    fn test_parse_long_row_truncated() {
        let csv = "a,b\n1,2,3,4\n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.cell(0, 1), Some("2"));
    }

    #[test]
    fn test_parse_empty_content_fails() {
        let err = parse_csv_str("", "empty.csv").unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_parse_whitespace_preserved() {
        let csv = "a\n  padded  \n";
        let table = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(table.cell(0, 0), Some("  padded  "));
    }
}
