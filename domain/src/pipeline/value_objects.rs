//! Pipeline value objects - immutable outputs of each stage.
//!
//! - [`GeneratedText`] - output of the generate stage, the single fan-out point
//! - [`Summary`] - output of the summarize stage
//! - [`TranslatedSummary`] - output of the translate stage
//! - [`AnswerResult`] - output of the answer stage
//! - [`AssistantResponse`] - the assembled response

use serde::{Deserialize, Serialize};

macro_rules! text_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(text: impl Into<String>) -> Self {
                Self(text.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Whitespace-separated word count
            pub fn word_count(&self) -> usize {
                self.0.split_whitespace().count()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

text_value!(
    /// Paragraph produced by the generator from the topic
    GeneratedText
);
text_value!(
    /// Summary derived from [`GeneratedText`]
    Summary
);
text_value!(
    /// French translation of a [`Summary`]
    TranslatedSummary
);

/// Extractive answer to the question over the generated text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Verbatim span of the context, or `None` when the model found no answer
    pub answer: Option<String>,
    /// Model confidence in `[0, 1]`
    pub score: Option<f64>,
}

impl AnswerResult {
    /// Creates an answer with its confidence, clamping the score into `[0, 1]`
    pub fn extracted(answer: impl Into<String>, score: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        Self {
            answer: Some(answer.into()),
            score: Some(score),
        }
    }

    /// The model declined to answer (no span in the context)
    pub fn no_answer() -> Self {
        Self {
            answer: None,
            score: None,
        }
    }

    /// Whether the answer is a contiguous substring of `context`.
    ///
    /// A missing answer is trivially extractive.
    pub fn is_extractive_of(&self, context: &str) -> bool {
        match &self.answer {
            Some(answer) => context.contains(answer.as_str()),
            None => true,
        }
    }
}

/// The `question_answer` block of the response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: Option<String>,
    pub score: Option<f64>,
}

/// Complete assistant response (Value Object)
///
/// Only built once every stage has succeeded; there is no partial form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub topic: String,
    pub generated_text: String,
    pub summary: String,
    pub translated_summary_fr: String,
    pub question_answer: QuestionAnswer,
}

impl AssistantResponse {
    pub fn assemble(
        topic: &str,
        question: &str,
        generated: GeneratedText,
        summary: Summary,
        translated: TranslatedSummary,
        answer: AnswerResult,
    ) -> Self {
        Self {
            topic: topic.to_string(),
            generated_text: generated.into_inner(),
            summary: summary.into_inner(),
            translated_summary_fr: translated.into_inner(),
            question_answer: QuestionAnswer {
                question: question.to_string(),
                answer: answer.answer,
                score: answer.score,
            },
        }
    }
}
