//! Error types for the analytics engines
//!
//! Shape and domain violations are always reported to the caller. Numeric
//! degeneracies (zero denominators, flat rescale ranges) are never errors;
//! each operation documents how it neutralizes them.

use thiserror::Error;

/// Result type alias for analytics operations
pub type GeoResult<T> = Result<T, GeoError>;

/// Error type shared by every analytics operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Wrong rank, non-square matrix, or mismatched lengths between inputs
    #[error("Invalid shape for '{name}': {details}")]
    InvalidShape { name: String, details: String },

    /// Unknown token, non-positive weight, non-binary indicator and similar
    #[error("Invalid argument '{parameter}' = '{value}': must satisfy {constraint}")]
    InvalidArgument {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// Input carries no usable signal (e.g. no comparative advantage anywhere)
    #[error("Degenerate data in {context}: {details}")]
    DegenerateData { context: String, details: String },
}

impl GeoError {
    /// Create an invalid shape error
    pub fn invalid_shape(name: impl Into<String>, details: impl Into<String>) -> Self {
        GeoError::InvalidShape {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        GeoError::InvalidArgument {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create a degenerate data error
    pub fn degenerate(context: impl Into<String>, details: impl Into<String>) -> Self {
        GeoError::DegenerateData {
            context: context.into(),
            details: details.into(),
        }
    }

    /// Shorthand for a length mismatch between a named input and the axis it must follow
    pub fn length_mismatch(name: impl Into<String>, expected: usize, got: usize) -> Self {
        GeoError::invalid_shape(
            name,
            format!("expected {} elements, got {}", expected, got),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_display() {
        let err = GeoError::invalid_shape("mat", "must be a 2-d array, found rank 3");
        let msg = err.to_string();
        assert!(msg.contains("mat"));
        assert!(msg.contains("rank 3"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = GeoError::invalid_argument("method", "Pearson", "one of 'Symmetric', 'Jaccard'");
        let msg = err.to_string();
        assert!(msg.contains("method"));
        assert!(msg.contains("Pearson"));
        assert!(msg.contains("Jaccard"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = GeoError::length_mismatch("weight", 4, 3);
        let msg = err.to_string();
        assert!(msg.contains("weight"));
        assert!(msg.contains('4'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_error_equality() {
        let err1 = GeoError::degenerate("pci", "no RCA");
        let err2 = GeoError::degenerate("pci", "no RCA");
        let err3 = GeoError::degenerate("eci", "no RCA");

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeoError>();
    }
}
