//! Error types for pure_pursuit

use thiserror::Error;

/// Main error type for the pure pursuit core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PursuitError {
    /// Degenerate line or circle (zero-length line, non-positive radius, NaN)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Path segment has no points, or too few to form a line
    #[error("Empty path segment")]
    EmptySegment,

    /// Index or hint outside the bounds of a path segment
    #[error("Index {index} out of range for segment of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for pure pursuit operations
pub type PursuitResult<T> = Result<T, PursuitError>;
