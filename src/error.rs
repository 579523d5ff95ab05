//! Error types for the tsp-stats library.
//!
//! Missing or degenerate data is never an error here: it surfaces as NaN in
//! the computed statistics. These variants are reserved for caller mistakes.

use thiserror::Error;

/// Result type alias for statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur while configuring or running the statistics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Fill method name not recognised.
    #[error("unknown fill method: {0}")]
    UnknownFillMethod(String),

    /// Output option not recognised.
    #[error("{0} is not a valid output option")]
    UnknownOutput(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = StatsError::UnknownFillMethod("spline7".to_string());
        assert_eq!(err.to_string(), "unknown fill method: spline7");

        let err = StatsError::UnknownOutput("weekly".to_string());
        assert_eq!(err.to_string(), "weekly is not a valid output option");

        let err = StatsError::InvalidParameter("q must be in [0, 1]".to_string());
        assert_eq!(err.to_string(), "invalid parameter: q must be in [0, 1]");

        let err = StatsError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 2");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = StatsError::Config("missing [gxg] table".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
