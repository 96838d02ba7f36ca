//! Schema reconciliation: extend two tables onto a shared column set
//!
//! The union column order is deterministic: the left table's columns in
//! their original order, then any columns unique to the right table in
//! their order of appearance. Cells for columns a table did not originally
//! have are null.

use crate::table::{Column, Row, Table};
use std::collections::HashSet;

/// Reconcile two tables onto the union of their columns.
///
/// Both returned tables carry the identical column set in union order;
/// row counts and surviving cell values are unchanged.
pub fn reconcile_schemas(left: &Table, right: &Table) -> (Table, Table) {
    // Union of column names, first-seen order across left then right
    let mut union_names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for table in [left, right] {
        for col in &table.columns {
            if seen.insert(col.name.clone()) {
                union_names.push(col.name.clone());
            }
        }
    }

    let columns: Vec<Column> = union_names
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.clone(), i))
        .collect();

    let aligned_left = align_to(left, &columns);
    let aligned_right = align_to(right, &columns);

    (aligned_left, aligned_right)
}

/// Remap a table's rows onto the given column order, nulling missing columns
fn align_to(table: &Table, columns: &[Column]) -> Table {
    // Union column index -> source column index, if the source has it
    let source_index: Vec<Option<usize>> = columns
        .iter()
        .map(|c| table.find_column(&c.name).map(|src| src.index))
        .collect();

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            let cells = source_index
                .iter()
                .map(|src| src.and_then(|i| row.cells.get(i).cloned().flatten()))
                .collect();
            Row::new(cells)
        })
        .collect();

    Table {
        columns: columns.to_vec(),
        rows,
    }
}
