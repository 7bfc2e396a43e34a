//! Fixed per-stage inference parameters
//!
//! Requests cannot tune these. They live here as named constants so tests
//! and alternative wiring can override them without touching orchestration.

use serde::{Deserialize, Serialize};

/// Sampling parameters for the generate stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
}

impl GenerationParams {
    pub const DEFAULT: GenerationParams = GenerationParams {
        max_new_tokens: 250,
        do_sample: true,
        temperature: 0.8,
        top_p: 0.95,
    };
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Length bounds for the summarize stage (deterministic decoding)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationParams {
    /// Summary length bounds, in model tokens
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
    /// Inputs with fewer whitespace-separated words are their own summary
    pub min_input_words: u32,
}

impl SummarizationParams {
    pub const DEFAULT: SummarizationParams = SummarizationParams {
        max_length: 100,
        min_length: 30,
        do_sample: false,
        min_input_words: 30,
    };
}

impl Default for SummarizationParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The single supported translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslationDirection {
    pub source: &'static str,
    pub target: &'static str,
}

impl TranslationDirection {
    pub const EN_TO_FR: TranslationDirection = TranslationDirection {
        source: "en",
        target: "fr",
    };
}

impl Default for TranslationDirection {
    fn default() -> Self {
        Self::EN_TO_FR
    }
}

/// All stage parameters, grouped
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StageParams {
    pub generation: GenerationParams,
    pub summarization: SummarizationParams,
    pub translation: TranslationDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_defaults() {
        let p = GenerationParams::default();
        assert_eq!(p.max_new_tokens, 250);
        assert!(p.do_sample);
        assert!((p.temperature - 0.8).abs() < f32::EPSILON);
        assert!((p.top_p - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn test_summarization_defaults() {
        let p = SummarizationParams::default();
        assert_eq!(p.max_length, 100);
        assert_eq!(p.min_length, 30);
        assert!(!p.do_sample);
        assert_eq!(p.min_input_words, 30);
    }

    #[test]
    fn test_translation_direction_is_fixed() {
        let params = StageParams::default();
        assert_eq!(params.translation, TranslationDirection::EN_TO_FR);
    }
}
