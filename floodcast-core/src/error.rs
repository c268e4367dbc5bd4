//! Model input errors
//!
//! The model has a single validation boundary: every caller-supplied value is
//! checked once, when it is turned into a typed input. Nothing past that point
//! can fail.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl ModelError {
    pub fn invalid_input(field: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        ModelError::InvalidInput {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input
    pub fn field(&self) -> &'static str {
        match self {
            ModelError::InvalidInput { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = ModelError::invalid_input("window_days", 15, "must be between 1 and 14");
        assert_eq!(
            err.to_string(),
            "invalid window_days '15': must be between 1 and 14"
        );
        assert_eq!(err.field(), "window_days");
    }
}
