//! Shape errors.

use thiserror::Error;

/// Errors raised by shape editing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("A shape needs at least 3 points to close, it has {count}")]
    TooFewPoints { count: usize },
    #[error("Shape is already closed")]
    AlreadyClosed,
    #[error("Constrained moves need exactly 4 points, the shape has {count}")]
    NotASquare { count: usize },
    #[error("Vertex index {index} out of range for {len} points")]
    VertexOutOfRange { index: usize, len: usize },
    #[error("Invalid rendering scale: {0}")]
    InvalidScale(f64),
}

/// Result type for shape operations.
pub type ShapeResult<T> = Result<T, ShapeError>;
