//! Pipeline stages and their dependency graph

use crate::core::model::ModelRole;
use serde::{Deserialize, Serialize};

/// One of the four model-backed transformations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Topic -> generated text
    Generate,
    /// Generated text -> summary
    Summarize,
    /// Summary -> French summary
    Translate,
    /// (question, generated text) -> extractive answer
    Answer,
}

impl Stage {
    /// Reference execution order when the two branches run sequentially
    pub const ORDER: [Stage; 4] = [
        Stage::Generate,
        Stage::Summarize,
        Stage::Translate,
        Stage::Answer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Generate => "generate",
            Stage::Summarize => "summarize",
            Stage::Translate => "translate",
            Stage::Answer => "answer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Generate => "Generate",
            Stage::Summarize => "Summarize",
            Stage::Translate => "Translate",
            Stage::Answer => "Answer",
        }
    }

    /// The model role this stage runs against
    pub fn role(&self) -> ModelRole {
        match self {
            Stage::Generate => ModelRole::Generator,
            Stage::Summarize => ModelRole::Summarizer,
            Stage::Translate => ModelRole::Translator,
            Stage::Answer => ModelRole::QuestionAnswerer,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_roles_are_distinct() {
        let roles: std::collections::HashSet<_> = Stage::ORDER.iter().map(Stage::role).collect();
        assert_eq!(roles.len(), 4);
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for stage in Stage::ORDER {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
    }
}
