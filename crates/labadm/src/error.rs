//! Error types for the labadm library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for labadm operations.
#[derive(Debug, Error)]
pub enum AdmError {
    /// A required field is missing from a row, or its cell is empty.
    #[error("Missing required field '{field}' in row {row}")]
    MissingField { row: usize, field: String },

    /// A field is present but cannot be converted to its target type.
    #[error("Cannot convert '{value}' in field '{field}' (row {row}) to {target}")]
    TypeCoercion {
        row: usize,
        field: String,
        value: String,
        target: &'static str,
    },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no rows to convert.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// No adapter is registered under the given name.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdmError {
    /// Row index the error is attributed to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            AdmError::MissingField { row, .. } | AdmError::TypeCoercion { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Field name the error is attributed to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            AdmError::MissingField { field, .. } | AdmError::TypeCoercion { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

/// Result type alias for labadm operations.
pub type Result<T> = std::result::Result<T, AdmError>;
