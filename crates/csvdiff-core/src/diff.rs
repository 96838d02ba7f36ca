//! Cell differ: walk two schema-aligned tables and emit ordered differences
//!
//! Differences come out in row-major order (ascending row index, then
//! columns in union order). The interactive walkthrough indexes its
//! prompts by this exact sequence, so the ordering is part of the
//! contract, not a presentation detail.

use crate::table::{Row, Table};
use serde::{Deserialize, Serialize};

/// Equality policy for cell comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    /// Null and empty string are distinct; both-null cells are equal.
    /// Used by the interactive CLI flow.
    NullAware,
    /// Null is coerced to the empty string before comparison, so a null
    /// cell and an empty cell are equal. Used by the upload/JSON flow.
    TextNormalized,
}

/// One cell-level discrepancy between two tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// Zero-based row index
    pub row: usize,
    /// Column name
    pub column: String,
    /// Value in the left (base) table
    pub old_value: Option<String>,
    /// Value in the right table
    pub new_value: Option<String>,
}

/// Compute the ordered difference list between two schema-aligned tables.
///
/// Both tables must already carry the identical column set (see
/// [`crate::reconcile::reconcile_schemas`]). The result is deterministic:
/// the same inputs and mode always produce the same sequence.
pub fn diff_tables(left: &Table, right: &Table, mode: DiffMode) -> Vec<Difference> {
    debug_assert_eq!(left.column_names(), right.column_names());

    let mut differences = Vec::new();
    let n = left.row_count().max(right.row_count());

    for i in 0..n {
        match (left.rows.get(i), right.rows.get(i)) {
            (Some(l), Some(r)) => {
                diff_row_pair(i, l, r, left, mode, &mut differences);
            }
            // Row exists only in the right table: every column is a
            // difference, the missing side is unconditionally absent.
            (None, Some(r)) => {
                for col in &left.columns {
                    differences.push(make_difference(i, &col.name, None, r.get(col.index), mode));
                }
            }
            // Row exists only in the left table: symmetric.
            (Some(l), None) => {
                for col in &left.columns {
                    differences.push(make_difference(i, &col.name, l.get(col.index), None, mode));
                }
            }
            (None, None) => unreachable!("index below max row count"),
        }
    }

    differences
}

fn diff_row_pair(
    row: usize,
    l: &Row,
    r: &Row,
    table: &Table,
    mode: DiffMode,
    out: &mut Vec<Difference>,
) {
    for col in &table.columns {
        let a = l.get(col.index);
        let b = r.get(col.index);

        let equal = match mode {
            // Option equality: both-None is equal, None vs Some("") is not
            DiffMode::NullAware => a == b,
            DiffMode::TextNormalized => a.unwrap_or("") == b.unwrap_or(""),
        };

        if !equal {
            out.push(make_difference(row, &col.name, a, b, mode));
        }
    }
}

/// Build a difference record, coercing values per the active mode.
///
/// In text-normalized mode the emitted values are the coerced strings,
/// matching what the comparison actually saw; null never appears.
fn make_difference(
    row: usize,
    column: &str,
    old: Option<&str>,
    new: Option<&str>,
    mode: DiffMode,
) -> Difference {
    let (old_value, new_value) = match mode {
        DiffMode::NullAware => (old.map(str::to_string), new.map(str::to_string)),
        DiffMode::TextNormalized => (
            Some(old.unwrap_or("").to_string()),
            Some(new.unwrap_or("").to_string()),
        ),
    };
    Difference {
        row,
        column: column.to_string(),
        old_value,
        new_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv_str;
    use crate::reconcile::reconcile_schemas;

    fn diff_strs(left: &str, right: &str, mode: DiffMode) -> Vec<Difference> {
        let l = parse_csv_str(left, "l.csv").unwrap();
        let r = parse_csv_str(right, "r.csv").unwrap();
        let (l, r) = reconcile_schemas(&l, &r);
        diff_tables(&l, &r, mode)
    }

    #[test]
    fn test_self_diff_is_empty() {
        let csv = "id,name\n1,Al\n2,\n";
        assert!(diff_strs(csv, csv, DiffMode::NullAware).is_empty());
        assert!(diff_strs(csv, csv, DiffMode::TextNormalized).is_empty());
    }

    #[test]
    fn test_changed_cell_reported() {
        let diffs = diff_strs("id,name\n1,Al\n", "id,name\n1,Bo\n", DiffMode::NullAware);

        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].row, 0);
        assert_eq!(diffs[0].column, "name");
        assert_eq!(diffs[0].old_value.as_deref(), Some("Al"));
        assert_eq!(diffs[0].new_value.as_deref(), Some("Bo"));
    }

    #[test]
    fn test_row_major_ordering() {
        let diffs = diff_strs(
            "a,b\n1,2\n3,4\n",
            "a,b\n9,8\n7,6\n",
            DiffMode::NullAware,
        );

        let addresses: Vec<(usize, &str)> =
            diffs.iter().map(|d| (d.row, d.column.as_str())).collect();
        assert_eq!(
            addresses,
            vec![(0, "a"), (0, "b"), (1, "a"), (1, "b")]
        );
    }

    #[test]
    fn test_determinism() {
        let left = "a,b,c\n1,2,3\n4,5,6\n";
        let right = "c,d\nX,Y\n";
        let first = diff_strs(left, right, DiffMode::NullAware);
        let second = diff_strs(left, right, DiffMode::NullAware);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extra_right_rows_emit_every_column() {
        let diffs = diff_strs(
            "id,name\n1,Al\n",
            "id,name\n1,Al\n2,Bo\n3,Cy\n",
            DiffMode::NullAware,
        );

        // Two extra rows, two columns each
        assert_eq!(diffs.len(), 4);
        assert!(diffs.iter().all(|d| d.old_value.is_none()));
        assert_eq!(diffs[0].row, 1);
        assert_eq!(diffs[0].new_value.as_deref(), Some("2"));
        assert_eq!(diffs[3].row, 2);
        assert_eq!(diffs[3].new_value.as_deref(), Some("Cy"));
    }

    #[test]
    fn test_extra_left_rows_emit_every_column() {
        let diffs = diff_strs(
            "id\n1\n2\n",
            "id\n1\n",
            DiffMode::TextNormalized,
        );

        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].row, 1);
        assert_eq!(diffs[0].old_value.as_deref(), Some("2"));
        assert_eq!(diffs[0].new_value.as_deref(), Some(""));
    }

    #[test]
    fn test_modes_diverge_only_on_null_vs_empty() {
        // The parser maps empty fields to null, so a present empty
        // string has to be built by hand.
        let mut l = parse_csv_str("a\nx\n", "l.csv").unwrap();
        l.set_cell(0, 0, Some(String::new()));
        let mut r = parse_csv_str("a\nx\n", "r.csv").unwrap();
        r.set_cell(0, 0, None);

        let typed = diff_tables(&l, &r, DiffMode::NullAware);
        let text = diff_tables(&l, &r, DiffMode::TextNormalized);

        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].old_value.as_deref(), Some(""));
        assert_eq!(typed[0].new_value, None);
        assert!(text.is_empty());
    }

    #[test]
    fn test_text_mode_never_emits_null() {
        let diffs = diff_strs(
            "a,b\n1,\n",
            "a,b\n2,x\n5,6\n",
            DiffMode::TextNormalized,
        );

        assert!(diffs
            .iter()
            .all(|d| d.old_value.is_some() && d.new_value.is_some()));
    }

    #[test]
    fn test_end_to_end_union_example() {
        // L: [id,name] with one row; R: [id,name,age] with two rows
        let diffs = diff_strs(
            "id,name\n1,Al\n",
            "id,name,age\n1,Al,\n2,Bo,\n",
            DiffMode::NullAware,
        );

        // Row 0: id and name equal, age is null on both sides -> no diff.
        // Row 1 exists only in R: one difference per union column.
        assert_eq!(diffs.len(), 3);
        assert_eq!(
            diffs
                .iter()
                .map(|d| (d.row, d.column.as_str()))
                .collect::<Vec<_>>(),
            vec![(1, "id"), (1, "name"), (1, "age")]
        );
        assert_eq!(diffs[0].new_value.as_deref(), Some("2"));
        assert_eq!(diffs[1].new_value.as_deref(), Some("Bo"));
        assert_eq!(diffs[2].new_value, None);
    }
}
