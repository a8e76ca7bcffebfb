//! Error types for the tabclean library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabclean operations.
#[derive(Debug, Error)]
pub enum TabcleanError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A column name was not found in the table.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// A row does not have one cell per header.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column does not have one value per table row.
    #[error("Column '{column}' has {found} values, table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A cell holds a value the operation cannot work with.
    #[error("Type mismatch in '{column}' at row {row}: {message}")]
    TypeMismatch {
        column: String,
        row: usize,
        message: String,
    },

    /// A value that must be numeric is not.
    #[error("Not a number: {0}")]
    NotNumeric(String),

    /// Range bounds are not ordered or not comparable.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A calendar date could not be constructed.
    #[error("Invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for tabclean operations.
pub type Result<T> = std::result::Result<T, TabcleanError>;

impl TabcleanError {
    /// Attach a cell position to a value-level error.
    pub(crate) fn at(self, column: &str, row: usize) -> Self {
        match self {
            TabcleanError::NotNumeric(message) => TabcleanError::TypeMismatch {
                column: column.to_string(),
                row,
                message,
            },
            other => other,
        }
    }
}
