//! Error types for csvdiff-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in csvdiff-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV content that cannot be interpreted as a table
    #[error("malformed input in '{path}': {message}")]
    MalformedInput { path: PathBuf, message: String },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required input file was not provided (upload path)
    #[error("missing file: {0}")]
    MissingFile(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
