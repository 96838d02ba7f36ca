//! Core table types for representing tabular CSV data

use serde::{Deserialize, Serialize};

/// A parsed table: ordered columns plus rows of optional string cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// Row data, positionally aligned with `columns`
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a cell value; `None` for an absent/null cell or out-of-range address
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .and_then(|c| c.as_deref())
    }

    /// Set a cell value, materializing null-filled rows up to `row` if the
    /// table is shorter than the target address.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Option<String>) {
        while self.rows.len() <= row {
            self.rows.push(Row::null_filled(self.columns.len()));
        }
        if let Some(cell) = self.rows[row].cells.get_mut(col) {
            *cell = value;
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// A row of data
///
/// `None` marks an absent/null cell; `Some("")` is a present empty string.
/// The two states are distinct and must stay distinct through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cell values for each column
    pub cells: Vec<Option<String>>,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Create a row of `width` null cells
    pub fn null_filled(width: usize) -> Self {
        Self {
            cells: vec![None; width],
        }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }
}
