//! Model roles and the catalog mapping each role to a hub model id

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The four model roles of the assistant pipeline (Value Object)
///
/// Each role is backed by exactly one model handle per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelRole {
    Generator,
    Summarizer,
    Translator,
    QuestionAnswerer,
}

impl ModelRole {
    pub const ALL: [ModelRole; 4] = [
        ModelRole::Generator,
        ModelRole::Summarizer,
        ModelRole::Translator,
        ModelRole::QuestionAnswerer,
    ];

    /// Get the string identifier for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Generator => "generator",
            ModelRole::Summarizer => "summarizer",
            ModelRole::Translator => "translator",
            ModelRole::QuestionAnswerer => "question_answerer",
        }
    }

    /// Hub task name served by models in this role
    pub fn task(&self) -> &'static str {
        match self {
            ModelRole::Generator => "text-generation",
            ModelRole::Summarizer => "summarization",
            ModelRole::Translator => "translation_en_to_fr",
            ModelRole::QuestionAnswerer => "question-answering",
        }
    }
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generator" => Ok(ModelRole::Generator),
            "summarizer" => Ok(ModelRole::Summarizer),
            "translator" => Ok(ModelRole::Translator),
            "question_answerer" | "qa" => Ok(ModelRole::QuestionAnswerer),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

impl Serialize for ModelRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Hub model identifier such as `facebook/bart-large-cnn` (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create a model id, rejecting blank strings and embedded whitespace
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidModelId("model id cannot be empty".to_string()));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidModelId(format!(
                "'{trimmed}' contains whitespace"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ModelId::new(s).map_err(serde::de::Error::custom)
    }
}

/// Which hub model serves each role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub generator: ModelId,
    pub summarizer: ModelId,
    pub translator: ModelId,
    pub question_answerer: ModelId,
}

impl ModelCatalog {
    pub const DEFAULT_GENERATOR: &'static str = "Qwen/Qwen2.5-3B-Instruct";
    pub const DEFAULT_SUMMARIZER: &'static str = "facebook/bart-large-cnn";
    pub const DEFAULT_TRANSLATOR: &'static str = "Helsinki-NLP/opus-mt-tc-big-en-fr";
    pub const DEFAULT_QUESTION_ANSWERER: &'static str = "deepset/roberta-base-squad2";

    pub fn model_for(&self, role: ModelRole) -> &ModelId {
        match role {
            ModelRole::Generator => &self.generator,
            ModelRole::Summarizer => &self.summarizer,
            ModelRole::Translator => &self.translator,
            ModelRole::QuestionAnswerer => &self.question_answerer,
        }
    }

    pub fn with_model(mut self, role: ModelRole, id: ModelId) -> Self {
        match role {
            ModelRole::Generator => self.generator = id,
            ModelRole::Summarizer => self.summarizer = id,
            ModelRole::Translator => self.translator = id,
            ModelRole::QuestionAnswerer => self.question_answerer = id,
        }
        self
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        // The defaults are compile-time constants without whitespace.
        Self {
            generator: ModelId(Self::DEFAULT_GENERATOR.to_string()),
            summarizer: ModelId(Self::DEFAULT_SUMMARIZER.to_string()),
            translator: ModelId(Self::DEFAULT_TRANSLATOR.to_string()),
            question_answerer: ModelId(Self::DEFAULT_QUESTION_ANSWERER.to_string()),
        }
    }
}
