//! Error types for the hub adapter

use assistant_application::InferenceError;
use thiserror::Error;

/// Result type alias for hub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// Errors that can occur when talking to the model hub
#[derive(Error, Debug)]
pub enum HubError {
    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Model '{0}' not found on the hub")]
    ModelNotFound(String),

    #[error("Model '{model}' is loading (estimated {estimated_secs:.0}s)")]
    ModelLoading { model: String, estimated_secs: f64 },

    #[error("Model '{model}' serves '{actual}', expected '{expected}'")]
    WrongTask {
        model: String,
        expected: &'static str,
        actual: String,
    },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Invalid hub configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for HubError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HubError::Timeout
        } else {
            HubError::Transport(e.to_string())
        }
    }
}

impl From<HubError> for InferenceError {
    fn from(e: HubError) -> Self {
        match e {
            HubError::Transport(_) => InferenceError::ConnectionError(e.to_string()),
            HubError::Timeout => InferenceError::Timeout,
            HubError::ModelNotFound(_)
            | HubError::ModelLoading { .. }
            | HubError::WrongTask { .. } => InferenceError::ModelNotAvailable(e.to_string()),
            HubError::Status { .. } | HubError::InvalidConfig(_) => {
                InferenceError::RequestFailed(e.to_string())
            }
            HubError::ParseError { .. } => InferenceError::InvalidResponse(e.to_string()),
        }
    }
}
