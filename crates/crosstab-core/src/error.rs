//! Error types for crosstab-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in crosstab-core
#[derive(Debug, Error)]
pub enum Error {
    /// A header names the same variable twice
    #[error("Duplicate variable code in header: {0}")]
    DuplicateColumn(String),

    /// A data row has more fields than the header declares
    #[error("Row {row} has {actual} fields but the header declares {expected}")]
    RowTooLong {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
