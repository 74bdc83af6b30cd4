//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a CSV point file.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Malformed JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension not recognised.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] pointreduce_core::Error),
}
