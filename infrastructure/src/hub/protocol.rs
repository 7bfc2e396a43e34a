//! Wire types for the Hugging Face Inference API.
//!
//! # Protocol Overview
//!
//! - **Inference**: `POST {inference_url}/models/{id}` with
//!   `{"inputs": ..., "parameters": {...}, "options": {...}}`
//! - **Metadata**: `GET {hub_url}/api/models/{id}`, read for `pipeline_tag`
//! - **Errors**: non-2xx responses carry `{"error": "...", "estimated_time": 12.3}`
//!
//! Response shapes differ per task; each has its own type below.

use crate::hub::error::HubError;
use assistant_domain::{GenerationParams, SummarizationParams, TranslationDirection};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Maximum number of raw body bytes kept in error messages
const RAW_PREVIEW_LEN: usize = 512;

/// `inputs` field of an inference request
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InferenceInputs<'a> {
    Text(&'a str),
    QuestionContext { question: &'a str, context: &'a str },
}

/// Request options shared by every task
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InferenceOptions {
    /// Block until a cold model is loaded instead of failing with 503
    pub wait_for_model: bool,
    pub use_cache: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            wait_for_model: true,
            use_cache: false,
        }
    }
}

/// Inference request body
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a, P> {
    pub inputs: InferenceInputs<'a>,
    pub parameters: P,
    pub options: InferenceOptions,
}

impl<'a, P: Serialize> InferenceRequest<'a, P> {
    pub fn new(inputs: InferenceInputs<'a>, parameters: P) -> Self {
        Self {
            inputs,
            parameters,
            options: InferenceOptions::default(),
        }
    }
}

/// `parameters` for text-generation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
    /// Ask the runtime not to echo the prompt
    pub return_full_text: bool,
}

impl From<&GenerationParams> for GenerationParameters {
    fn from(p: &GenerationParams) -> Self {
        Self {
            max_new_tokens: p.max_new_tokens,
            do_sample: p.do_sample,
            temperature: p.temperature,
            top_p: p.top_p,
            return_full_text: false,
        }
    }
}

/// `parameters` for summarization
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummarizationParameters {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl From<&SummarizationParams> for SummarizationParameters {
    fn from(p: &SummarizationParams) -> Self {
        Self {
            max_length: p.max_length,
            min_length: p.min_length,
            do_sample: p.do_sample,
        }
    }
}

/// `parameters` for translation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TranslationParameters {
    pub src_lang: &'static str,
    pub tgt_lang: &'static str,
}

impl From<TranslationDirection> for TranslationParameters {
    fn from(d: TranslationDirection) -> Self {
        Self {
            src_lang: d.source,
            tgt_lang: d.target,
        }
    }
}

/// `parameters` for question-answering
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuestionAnsweringParameters {
    pub top_k: u32,
    /// Allow the empty "no answer" span (SQuAD2-style models)
    pub handle_impossible_answer: bool,
}

impl Default for QuestionAnsweringParameters {
    fn default() -> Self {
        Self {
            top_k: 1,
            handle_impossible_answer: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedTextItem {
    pub generated_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryItem {
    pub summary_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationItem {
    pub translation_text: String,
}

/// One extractive answer; the reported `start`/`end` offsets are not kept
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerItem {
    pub answer: String,
    pub score: f64,
}

/// Question-answering responses come as one object or a ranked list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerResponse {
    One(AnswerItem),
    Many(Vec<AnswerItem>),
}

impl AnswerResponse {
    /// The best-ranked span, if any
    pub fn best(self) -> Option<AnswerItem> {
        match self {
            AnswerResponse::One(item) => Some(item),
            AnswerResponse::Many(items) => items.into_iter().next(),
        }
    }
}

/// Error body of a non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub estimated_time: Option<f64>,
}

/// Subset of `GET /api/models/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub id: String,
    pub pipeline_tag: Option<String>,
}

/// Whether a hub `pipeline_tag` can serve `task`.
///
/// Translation models are tagged `translation` while the task names the
/// direction (`translation_en_to_fr`).
pub fn task_matches(task: &str, pipeline_tag: &str) -> bool {
    task == pipeline_tag
        || task
            .strip_prefix(pipeline_tag)
            .is_some_and(|rest| rest.starts_with('_'))
}

/// Classify a non-2xx response
pub fn classify_status(status: u16, model: &str, body: &str) -> HubError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed
        .as_ref()
        .map(|b| b.error.clone())
        .unwrap_or_else(|| preview(body));

    match status {
        404 => HubError::ModelNotFound(model.to_string()),
        503 => HubError::ModelLoading {
            model: model.to_string(),
            estimated_secs: parsed.and_then(|b| b.estimated_time).unwrap_or(0.0),
        },
        408 | 504 => HubError::Timeout,
        _ => HubError::Status { status, message },
    }
}

/// Decode a 2xx body into `T`
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, HubError> {
    serde_json::from_str(body).map_err(|e| HubError::ParseError {
        error: e.to_string(),
        raw: preview(body),
    })
}

/// First element of a list response, or a parse error naming `field`
pub fn first_item<T>(items: Vec<T>, field: &str) -> Result<T, HubError> {
    items.into_iter().next().ok_or_else(|| HubError::ParseError {
        error: format!("empty response, expected one '{field}' item"),
        raw: "[]".to_string(),
    })
}

fn preview(body: &str) -> String {
    if body.len() <= RAW_PREVIEW_LEN {
        return body.to_string();
    }
    let mut end = RAW_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
