//! API error handling

use assistant_application::PipelineError;
use assistant_domain::{DomainError, ModelRole, Stage};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// API error type
///
/// Messages are written for clients: runtime details stay in the server log.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request failed validation; the pipeline never ran
    Validation {
        message: String,
        field: Option<&'static str>,
    },
    /// A stage's inference failed
    Stage { stage: Stage },
    /// A model handle could not be constructed
    ModelUnavailable { role: ModelRole },
    /// The server cannot take the request (shutting down)
    Unavailable(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>, field: Option<&'static str>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::Unavailable(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Stage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ModelUnavailable { .. } | ApiError::Unavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::Validation { message, field } => json!({
                "type": "validation_error",
                "message": message,
                "field": field,
            }),
            ApiError::Stage { stage } => json!({
                "type": "stage_error",
                "stage": stage,
                "message": format!("The {} stage failed", stage),
            }),
            ApiError::ModelUnavailable { role } => json!({
                "type": "model_unavailable",
                "role": role,
                "message": format!("The {} model is currently unavailable", role),
            }),
            ApiError::Unavailable(message) => json!({
                "type": "service_unavailable",
                "message": message,
            }),
        };
        (status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let field = err.field();
        let message = match &err {
            DomainError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        };
        ApiError::validation(message, field)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text(), None)
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidRequest(e) => e.into(),
            PipelineError::ModelUnavailable(e) => ApiError::ModelUnavailable { role: e.role() },
            PipelineError::Stage(e) => ApiError::Stage { stage: e.stage },
            PipelineError::Cancelled { .. } => ApiError::unavailable("server is shutting down"),
        }
    }
}
