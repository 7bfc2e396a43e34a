//! Model hub port
//!
//! Defines how the application layer obtains and calls inference models.
//! Loading a handle is expensive and fallible; calling one is a single
//! blocking-from-the-caller's-view inference request.

use assistant_domain::{GenerationParams, ModelId, SummarizationParams, TranslationDirection};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading or calling a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Source of model handles
///
/// This port defines how the registry constructs handles. Implementations
/// (adapters) live in the infrastructure layer. Each `load_*` call may be
/// slow; the registry guarantees it runs at most once per role on success.
#[async_trait]
pub trait ModelHub: Send + Sync {
    async fn load_generator(
        &self,
        model: &ModelId,
    ) -> Result<Arc<dyn TextGenerator>, InferenceError>;

    async fn load_summarizer(
        &self,
        model: &ModelId,
    ) -> Result<Arc<dyn Summarizer>, InferenceError>;

    async fn load_translator(
        &self,
        model: &ModelId,
    ) -> Result<Arc<dyn Translator>, InferenceError>;

    async fn load_question_answerer(
        &self,
        model: &ModelId,
    ) -> Result<Arc<dyn QuestionAnswerer>, InferenceError>;
}

/// A loaded text-generation model
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model(&self) -> &ModelId;

    /// Continue `prompt`, returning only the generated continuation when the
    /// runtime supports it
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, InferenceError>;
}

/// A loaded summarization model
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn model(&self) -> &ModelId;

    async fn summarize(
        &self,
        text: &str,
        params: &SummarizationParams,
    ) -> Result<String, InferenceError>;
}

/// A loaded translation model
#[async_trait]
pub trait Translator: Send + Sync {
    fn model(&self) -> &ModelId;

    async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
    ) -> Result<String, InferenceError>;
}

/// Raw extractive answer as reported by the runtime
#[derive(Debug, Clone, PartialEq)]
pub struct RawAnswer {
    pub answer: String,
    pub score: f64,
}

/// A loaded extractive question-answering model
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    fn model(&self) -> &ModelId;

    async fn answer(&self, question: &str, context: &str) -> Result<RawAnswer, InferenceError>;
}
