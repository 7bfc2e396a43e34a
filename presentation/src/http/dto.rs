//! Request and response bodies of the HTTP API

use assistant_domain::{AssistantRequest, DomainError, ModelRole};
use serde::{Deserialize, Serialize};

/// Body of `POST /ai-assistant`
///
/// Fields are optional here so a missing field is reported by name instead
/// of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantRequestBody {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

impl AssistantRequestBody {
    pub fn into_request(self) -> Result<AssistantRequest, DomainError> {
        let topic = self
            .topic
            .ok_or_else(|| DomainError::validation("topic", "field required"))?;
        let question = self
            .question
            .ok_or_else(|| DomainError::validation("question", "field required"))?;
        AssistantRequest::new(topic, question)
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: Vec<ModelRole>,
}

/// One entry of `GET /models`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub role: ModelRole,
    pub model: String,
    pub task: String,
    pub loaded: bool,
}

/// Body of `GET /models`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelStatus>,
}
