//! Shape errors for host-side matrix handling.

use thiserror::Error;

/// Errors raised when matrix data does not match its declared shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Input data cannot form a square matrix of the declared dimension.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Result type for shape-checked operations.
pub type Result<T> = std::result::Result<T, ShapeError>;
