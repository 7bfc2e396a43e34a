//! Domain layer for multilingual-assistant
//!
//! This crate contains the request/response values, model roles and stage
//! definitions. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Pipeline
//!
//! A request runs four stages against four model roles:
//!
//! ```text
//! generate ──► summarize ──► translate
//!     └──────► answer
//! ```
//!
//! `generate` is the only fan-out point. `answer` shares nothing with the
//! summarize/translate branch except the generated text.

pub mod core;
pub mod pipeline;
pub mod prompt;

// Re-export commonly used types
pub use crate::core::{
    error::DomainError,
    model::{ModelCatalog, ModelId, ModelRole},
    request::AssistantRequest,
};
pub use pipeline::{
    params::{GenerationParams, StageParams, SummarizationParams, TranslationDirection},
    stage::Stage,
    value_objects::{
        AnswerResult, AssistantResponse, GeneratedText, QuestionAnswer, Summary,
        TranslatedSummary,
    },
};
pub use prompt::PromptTemplate;
