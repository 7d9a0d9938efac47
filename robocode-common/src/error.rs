use thiserror::Error;

/// Errors reported by [`Vector2`](crate::Vector2) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorError {
    /// A direction was requested from the zero vector.
    #[error("degenerate zero vector has no direction (in {operation})")]
    Degenerate { operation: &'static str },
}
