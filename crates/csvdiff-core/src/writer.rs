//! CSV output for merged tables

use crate::error::{Error, Result};
use crate::table::Table;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a table as CSV; null cells become empty fields
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(table.columns.iter().map(|c| c.name.as_str()))
        .map_err(csv_to_io)?;

    for row in &table.rows {
        csv_writer
            .write_record(row.cells.iter().map(|c| c.as_deref().unwrap_or("")))
            .map_err(csv_to_io)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write a table to a CSV file, overwriting any existing file
pub fn write_csv_file<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv(table, BufWriter::new(file))
}

// Writer-side csv errors are IO at heart; unwrap to the inner error
// rather than inventing a path for the in-memory case.
fn csv_to_io(e: csv::Error) -> Error {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        other => Error::Io(std::io::Error::other(format!("CSV write error: {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv_str;

    fn to_string(table: &Table) -> String {
        let mut buf = Vec::new();
        write_csv(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_round_trips_header_and_rows() {
        let table = parse_csv_str("id,name\n1,Al\n2,Bo\n", "t.csv").unwrap();
        assert_eq!(to_string(&table), "id,name\n1,Al\n2,Bo\n");
    }

    #[test]
    fn test_null_cells_become_empty_fields() {
        let table = parse_csv_str("a,b\n1,\n", "t.csv").unwrap();
        assert_eq!(to_string(&table), "a,b\n1,\n");
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut table = parse_csv_str("a\nx\n", "t.csv").unwrap();
        table.set_cell(0, 0, Some("one,two".to_string()));
        assert_eq!(to_string(&table), "a\n\"one,two\"\n");
    }
}
