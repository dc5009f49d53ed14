//! Error types for statement compilation.

use thiserror::Error;

/// The main error type for building InfluxQL statements.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The number of `?` placeholders does not match the supplied values.
    #[error("Mismatched number of placeholders ({placeholders}) and values ({values})")]
    PlaceholderMismatch { placeholders: usize, values: usize },

    /// A shorthand condition was given zero or several values.
    #[error("Expecting exactly one value")]
    ExpectedSingleValue,

    /// A shorthand condition with more than two tokens.
    #[error("Unsupported expression {0:?}")]
    UnsupportedExpression(String),

    /// A shorthand condition with no tokens at all.
    #[error("Expecting statement")]
    EmptyCondition,

    /// The statement needs a measurement but `from` was never called.
    #[error("{statement} requires a measurement")]
    MissingMeasurement { statement: &'static str },

    /// A retention policy qualifier without the measurement it qualifies.
    #[error("retention policy specified, but measurement was not specified")]
    RetentionPolicyWithoutMeasurement,

    /// A duration token that could not be parsed.
    #[error("Invalid duration: {0:?}")]
    InvalidDuration(String),

    /// An unknown fill option.
    #[error("Invalid fill option: {0:?}. Expected: null, none, previous, linear or a number")]
    InvalidFill(String),

    /// Configuration or statement file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Create a placeholder/value count mismatch error.
    pub fn mismatch(placeholders: usize, values: usize) -> Self {
        Self::PlaceholderMismatch {
            placeholders,
            values,
        }
    }

    /// Create a missing measurement error for the given statement kind.
    pub fn missing_measurement(statement: &'static str) -> Self {
        Self::MissingMeasurement { statement }
    }
}

/// Result type alias for statement compilation.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mismatch_display() {
        let err = QueryError::mismatch(2, 1);
        assert_eq!(
            err.to_string(),
            "Mismatched number of placeholders (2) and values (1)"
        );
    }

    #[test]
    fn test_unsupported_expression_display() {
        let err = QueryError::UnsupportedExpression("altitude >= x".to_string());
        assert_eq!(err.to_string(), r#"Unsupported expression "altitude >= x""#);
    }

    #[test]
    fn test_missing_measurement_display() {
        let err = QueryError::missing_measurement("SELECT");
        assert_eq!(err.to_string(), "SELECT requires a measurement");
    }
}
