//! csvdiff-core: Core library for cell-level CSV comparison and merging
//!
//! This library provides functionality to:
//! - Parse CSV files into structured tables (all fields kept as text)
//! - Reconcile two tables onto a shared, deterministically ordered column set
//! - Compute an ordered list of cell-level differences between two tables
//! - Apply accept/reject decisions over those differences onto a base table
//! - Write the merged result back out as CSV

pub mod diff;
pub mod error;
pub mod merge;
pub mod parser;
pub mod reconcile;
pub mod table;
pub mod writer;

pub use diff::{diff_tables, DiffMode, Difference};
pub use error::{Error, Result};
pub use merge::{apply_decisions, Decision};
pub use parser::{parse_csv, parse_csv_str};
pub use reconcile::reconcile_schemas;
pub use table::{Column, Row, Table};
pub use writer::{write_csv, write_csv_file};
