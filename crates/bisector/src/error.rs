//! Error types for the bisector crate.

use thiserror::Error;

/// Errors that can occur when building a search.
///
/// A running search never fails: candidates that cannot be used (outside the
/// live bounds, repeated, non-finite) end the run instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// One of the range endpoints is `NaN` or infinite.
    #[error("invalid range [{left}, {right}]: endpoints must be finite")]
    InvalidRange { left: f64, right: f64 },

    /// Split ratio outside `[0, 1]`.
    #[error("split ratio {0} is outside [0, 1]")]
    InvalidRatio(f64),

    /// Epsilon must be a positive finite number.
    #[error("epsilon must be positive, got {0}")]
    NonpositiveEpsilon(f64),
}

/// Result type for bisector operations.
pub type Result<T> = std::result::Result<T, SearchError>;
