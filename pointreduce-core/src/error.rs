//! Error types for pointreduce-core.

use thiserror::Error;

/// Result type alias for pointreduce operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for point reduction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Radius is not a positive, finite number.
    #[error("invalid radius: {0} (must be positive and finite)")]
    InvalidRadius(f64),

    /// Input point with a non-finite coordinate.
    #[error("invalid point at index {index}: ({x}, {y})")]
    InvalidPoint { index: usize, x: f64, y: f64 },

    /// Strategy name not recognised by the dispatcher.
    #[error("unknown clustering strategy: {0:?}")]
    UnknownStrategy(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// Points were dropped while the configuration demanded none.
    #[error("{dropped} of {total} points were not assigned to any cluster")]
    PointsDropped { dropped: usize, total: usize },
}
