//! Role-based model configuration from TOML (`[models]` section)

use super::ConfigIssue;
use assistant_domain::{ModelCatalog, ModelId, ModelRole};
use serde::{Deserialize, Serialize};

/// Hub model id per role
///
/// # Example
///
/// ```toml
/// [models]
/// generator = "Qwen/Qwen2.5-3B-Instruct"
/// summarizer = "facebook/bart-large-cnn"
/// translator = "Helsinki-NLP/opus-mt-tc-big-en-fr"
/// question_answerer = "deepset/roberta-base-squad2"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub generator: String,
    pub summarizer: String,
    pub translator: String,
    pub question_answerer: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            generator: ModelCatalog::DEFAULT_GENERATOR.to_string(),
            summarizer: ModelCatalog::DEFAULT_SUMMARIZER.to_string(),
            translator: ModelCatalog::DEFAULT_TRANSLATOR.to_string(),
            question_answerer: ModelCatalog::DEFAULT_QUESTION_ANSWERER.to_string(),
        }
    }
}

impl FileModelsConfig {
    fn raw(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Generator => &self.generator,
            ModelRole::Summarizer => &self.summarizer,
            ModelRole::Translator => &self.translator,
            ModelRole::QuestionAnswerer => &self.question_answerer,
        }
    }

    /// Build the catalog, collecting issues for invalid ids.
    ///
    /// A rejected id keeps the built-in default for its role.
    pub fn to_catalog(&self) -> (ModelCatalog, Vec<ConfigIssue>) {
        let mut catalog = ModelCatalog::default();
        let mut issues = Vec::new();

        for role in ModelRole::ALL {
            match ModelId::new(self.raw(role)) {
                Ok(id) => catalog = catalog.with_model(role, id),
                Err(e) => issues.push(ConfigIssue::error(format!("models.{}", role), e.to_string())),
            }
        }

        (catalog, issues)
    }
}
