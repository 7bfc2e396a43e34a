//! Assistant request value object

use crate::core::error::DomainError;
use serde::Serialize;

/// A validated assistant request (Value Object)
///
/// Both fields hold at least [`AssistantRequest::MIN_FIELD_LEN`] characters
/// after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantRequest {
    topic: String,
    question: String,
}

impl AssistantRequest {
    pub const MIN_FIELD_LEN: usize = 3;

    /// Create a new request, validating both fields
    pub fn new(
        topic: impl Into<String>,
        question: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let topic = Self::validate_field("topic", topic.into())?;
        let question = Self::validate_field("question", question.into())?;
        Ok(Self { topic, question })
    }

    fn validate_field(field: &'static str, value: String) -> Result<String, DomainError> {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        if len < Self::MIN_FIELD_LEN {
            return Err(DomainError::validation(
                field,
                format!(
                    "must be at least {} characters (got {len})",
                    Self::MIN_FIELD_LEN
                ),
            ));
        }
        Ok(trimmed.to_string())
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Re-check the invariants; the orchestrator calls this before any model call
    pub fn check(&self) -> Result<(), DomainError> {
        if self.topic.trim().is_empty() {
            return Err(DomainError::validation("topic", "must not be empty"));
        }
        if self.question.trim().is_empty() {
            return Err(DomainError::validation("question", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let req = AssistantRequest::new("ocean currents", "What drives ocean currents?").unwrap();
        assert_eq!(req.topic(), "ocean currents");
        assert_eq!(req.question(), "What drives ocean currents?");
        assert!(req.check().is_ok());
    }

    #[test]
    fn test_short_topic_rejected() {
        let err = AssistantRequest::new("ab", "ok").unwrap_err();
        assert_eq!(err.field(), Some("topic"));
    }

    #[test]
    fn test_short_question_rejected() {
        let err = AssistantRequest::new("ocean", "ok").unwrap_err();
        assert_eq!(err.field(), Some("question"));
    }

    #[test]
    fn test_whitespace_does_not_count() {
        assert!(AssistantRequest::new("  a  ", "What?").is_err());
        let req = AssistantRequest::new("  tea  ", " why? ").unwrap();
        assert_eq!(req.topic(), "tea");
        assert_eq!(req.question(), "why?");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Two characters, six bytes
        assert!(AssistantRequest::new("海流", "なぜ?").is_err());
        assert!(AssistantRequest::new("海流だ", "なぜ?").is_ok());
    }
}
