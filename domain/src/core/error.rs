//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Unknown model role: {0}")]
    UnknownRole(String),

    #[error("Invalid model id: {0}")]
    InvalidModelId(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending request field, if this is a validation failure
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DomainError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = DomainError::validation("topic", "must be at least 3 characters");
        assert_eq!(
            error.to_string(),
            "Invalid topic: must be at least 3 characters"
        );
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(
            DomainError::validation("question", "missing").field(),
            Some("question")
        );
        assert_eq!(DomainError::UnknownRole("x".to_string()).field(), None);
    }
}
