//! Error types for geometry operations

use thiserror::Error;

/// Errors raised by the geometry routines
///
/// Every degenerate configuration is detected before the division that would
/// turn it into a non-finite value, and reported through one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// The configuration has no well-defined unique answer
    /// (collinear points, overlapping circles, zero-length vector)
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// The input itself is malformed (wrong dimensionality, negative radius, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GeomError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!("degenerate geometry input: {}", reason);
        Self::DegenerateInput(reason)
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!("invalid geometry argument: {}", reason);
        Self::InvalidArgument(reason)
    }
}

/// Result type for geometry operations
pub type GeomResult<T> = Result<T, GeomError>;
