//! Stage functions
//!
//! One adapter per model role: shape the domain input for the model, call
//! it, and normalize the raw output. Every runtime failure is returned as a
//! [`StageError`] tagged with its stage; no stage substitutes a default.

use crate::ports::model_hub::{
    InferenceError, QuestionAnswerer, Summarizer, TextGenerator, Translator,
};
use assistant_domain::{
    AnswerResult, GeneratedText, GenerationParams, PromptTemplate, Stage, Summary,
    SummarizationParams, TranslatedSummary, TranslationDirection,
};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A stage's inference failed
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Stage '{stage}' failed: {message}")]
pub struct StageError {
    pub stage: Stage,
    pub message: String,
}

impl StageError {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    pub fn from_inference(stage: Stage, error: &InferenceError) -> Self {
        Self::new(stage, error.to_string())
    }

    pub fn timed_out(stage: Stage, limit: Duration) -> Self {
        Self::new(stage, format!("timed out after {} ms", limit.as_millis()))
    }
}

/// Generate a paragraph about `topic`
pub async fn generate(
    generator: &dyn TextGenerator,
    topic: &str,
    params: &GenerationParams,
) -> Result<GeneratedText, StageError> {
    let prompt = PromptTemplate::topic_paragraph(topic);
    let raw = generator
        .generate(&prompt, params)
        .await
        .map_err(|e| StageError::from_inference(Stage::Generate, &e))?;

    Ok(GeneratedText::new(PromptTemplate::strip_echo(&prompt, &raw)))
}

/// Summarize the generated text.
///
/// Blank input is an error. Input shorter than `min_input_words` words is
/// passed through unchanged without a model call.
pub async fn summarize(
    summarizer: &dyn Summarizer,
    text: &GeneratedText,
    params: &SummarizationParams,
) -> Result<Summary, StageError> {
    if text.is_blank() {
        return Err(StageError::new(
            Stage::Summarize,
            "generated text is empty, nothing to summarize",
        ));
    }

    let words = text.word_count();
    if words < params.min_input_words as usize {
        debug!(
            "Generated text has {} words (< {}), passing through",
            words, params.min_input_words
        );
        return Ok(Summary::new(text.as_str().trim()));
    }

    let raw = summarizer
        .summarize(text.as_str(), params)
        .await
        .map_err(|e| StageError::from_inference(Stage::Summarize, &e))?;

    let summary = raw.trim();
    if summary.is_empty() {
        return Err(StageError::new(Stage::Summarize, "model returned an empty summary"));
    }
    Ok(Summary::new(summary))
}

/// Translate the summary in the fixed direction
pub async fn translate(
    translator: &dyn Translator,
    summary: &Summary,
    direction: TranslationDirection,
) -> Result<TranslatedSummary, StageError> {
    if summary.is_blank() {
        return Err(StageError::new(Stage::Translate, "summary is empty, nothing to translate"));
    }

    let raw = translator
        .translate(summary.as_str(), direction)
        .await
        .map_err(|e| StageError::from_inference(Stage::Translate, &e))?;

    let translated = raw.trim();
    if translated.is_empty() {
        return Err(StageError::new(Stage::Translate, "model returned an empty translation"));
    }
    Ok(TranslatedSummary::new(translated))
}

/// Answer `question` extractively over the generated text
pub async fn answer(
    qa: &dyn QuestionAnswerer,
    question: &str,
    context: &GeneratedText,
) -> Result<AnswerResult, StageError> {
    if context.is_blank() {
        return Err(StageError::new(Stage::Answer, "context is empty"));
    }

    let raw = qa
        .answer(question, context.as_str())
        .await
        .map_err(|e| StageError::from_inference(Stage::Answer, &e))?;

    if raw.answer.trim().is_empty() {
        return Ok(AnswerResult::no_answer());
    }

    let result = AnswerResult::extracted(raw.answer, raw.score);
    if !result.is_extractive_of(context.as_str()) {
        return Err(StageError::new(
            Stage::Answer,
            "answer is not a substring of the generated text",
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_hub::{ModelHub, RawAnswer};
    use crate::testing::MockHub;
    use assistant_domain::{ModelCatalog, ModelId};
    use async_trait::async_trait;

    const LONG_TEXT: &str = "Ocean currents are driven by wind, temperature and salinity. \
        Surface currents follow the prevailing winds while deep currents are driven by \
        density differences in a global conveyor belt that redistributes heat around \
        the planet and shapes regional climates over long periods of time.";

    fn catalog() -> ModelCatalog {
        ModelCatalog::default()
    }

    #[tokio::test]
    async fn test_generate_strips_echoed_prompt() {
        let prompt = PromptTemplate::topic_paragraph("tides");
        let hub = MockHub::new(format!("{prompt} Tides follow the moon."));
        let generator = hub.load_generator(&catalog().generator).await.unwrap();

        let text = generate(generator.as_ref(), "tides", &GenerationParams::DEFAULT)
            .await
            .unwrap();
        assert_eq!(text.as_str(), "Tides follow the moon.");
    }

    #[tokio::test]
    async fn test_generate_failure_is_tagged() {
        let hub = MockHub::new("x").failing_stage(Stage::Generate);
        let generator = hub.load_generator(&catalog().generator).await.unwrap();

        let err = generate(generator.as_ref(), "tides", &GenerationParams::DEFAULT)
            .await
            .unwrap_err();
        assert_eq!(err.stage, Stage::Generate);
    }

    #[tokio::test]
    async fn test_summarize_empty_text_fails_without_model_call() {
        let hub = MockHub::new("");
        let summarizer = hub.load_summarizer(&catalog().summarizer).await.unwrap();

        let err = summarize(
            summarizer.as_ref(),
            &GeneratedText::new("   "),
            &SummarizationParams::DEFAULT,
        )
        .await
        .unwrap_err();

        assert_eq!(err.stage, Stage::Summarize);
        assert!(hub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_short_text_passes_through() {
        let hub = MockHub::new("");
        let summarizer = hub.load_summarizer(&catalog().summarizer).await.unwrap();

        let summary = summarize(
            summarizer.as_ref(),
            &GeneratedText::new(" Tides rise twice a day. "),
            &SummarizationParams::DEFAULT,
        )
        .await
        .unwrap();

        assert_eq!(summary.as_str(), "Tides rise twice a day.");
        assert!(hub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_long_text_calls_model() {
        let hub = MockHub::new("");
        let summarizer = hub.load_summarizer(&catalog().summarizer).await.unwrap();

        let summary = summarize(
            summarizer.as_ref(),
            &GeneratedText::new(LONG_TEXT),
            &SummarizationParams::DEFAULT,
        )
        .await
        .unwrap();

        assert_eq!(
            summary.as_str(),
            "Ocean currents are driven by wind, temperature and salinity."
        );
        assert_eq!(hub.calls(), vec![Stage::Summarize]);
    }

    #[tokio::test]
    async fn test_pass_through_threshold_is_counted_in_words() {
        let hub = MockHub::new("");
        let summarizer = hub.load_summarizer(&catalog().summarizer).await.unwrap();
        let params = SummarizationParams {
            min_input_words: 3,
            ..SummarizationParams::DEFAULT
        };

        // Four words clear a three-word threshold even though min_length is 30
        let summary = summarize(
            summarizer.as_ref(),
            &GeneratedText::new("Tides rise. Tides fall."),
            &params,
        )
        .await
        .unwrap();

        assert_eq!(summary.as_str(), "Tides rise.");
        assert_eq!(hub.calls(), vec![Stage::Summarize]);
    }

    #[tokio::test]
    async fn test_translate_uses_fixed_direction() {
        let hub = MockHub::new("");
        let translator = hub.load_translator(&catalog().translator).await.unwrap();

        let translated = translate(
            translator.as_ref(),
            &Summary::new("Currents move heat."),
            TranslationDirection::EN_TO_FR,
        )
        .await
        .unwrap();
        assert_eq!(translated.as_str(), "[fr] Currents move heat.");
    }

    #[tokio::test]
    async fn test_answer_is_extractive_and_repeatable() {
        let hub = MockHub::new("");
        let qa = hub.load_question_answerer(&catalog().question_answerer).await.unwrap();
        let context = GeneratedText::new(LONG_TEXT);

        let first = answer(qa.as_ref(), "What role does salinity play?", &context)
            .await
            .unwrap();
        let second = answer(qa.as_ref(), "What role does salinity play?", &context)
            .await
            .unwrap();

        assert_eq!(first.answer.as_deref(), Some("salinity"));
        assert!(first.is_extractive_of(context.as_str()));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_answer_becomes_no_answer() {
        let hub = MockHub::new("");
        let qa = hub.load_question_answerer(&catalog().question_answerer).await.unwrap();

        let result = answer(qa.as_ref(), "Who?", &GeneratedText::new(LONG_TEXT))
            .await
            .unwrap();
        assert_eq!(result, AnswerResult::no_answer());
    }

    struct HallucinatingQa(ModelId);

    #[async_trait]
    impl QuestionAnswerer for HallucinatingQa {
        fn model(&self) -> &ModelId {
            &self.0
        }

        async fn answer(&self, _q: &str, _c: &str) -> Result<RawAnswer, InferenceError> {
            Ok(RawAnswer {
                answer: "the moon".to_string(),
                score: 0.99,
            })
        }
    }

    #[tokio::test]
    async fn test_non_extractive_answer_is_rejected() {
        let qa = HallucinatingQa(catalog().question_answerer);
        let err = answer(&qa, "What drives currents?", &GeneratedText::new(LONG_TEXT))
            .await
            .unwrap_err();
        assert_eq!(err.stage, Stage::Answer);
    }
}
