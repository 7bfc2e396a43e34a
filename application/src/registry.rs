//! Model registry to ensure each role's model is loaded once and shared.
//!
//! Every role owns a [`OnceCell`]. Concurrent first callers for a role wait
//! on the same initialization, so a role is loaded at most once per process
//! on success. A failed load leaves the cell empty and the next call retries.

use crate::ports::model_hub::{
    InferenceError, ModelHub, QuestionAnswerer, Summarizer, TextGenerator, Translator,
};
use assistant_domain::{ModelCatalog, ModelId, ModelRole};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Errors surfaced by the registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Model '{model}' for role '{role}' is unavailable: {reason}")]
    ModelUnavailable {
        role: ModelRole,
        model: ModelId,
        reason: String,
    },
}

impl RegistryError {
    pub fn role(&self) -> ModelRole {
        match self {
            RegistryError::ModelUnavailable { role, .. } => *role,
        }
    }
}

/// A shared, read-only handle to a loaded model
#[derive(Clone)]
pub enum ModelHandle {
    Generator(Arc<dyn TextGenerator>),
    Summarizer(Arc<dyn Summarizer>),
    Translator(Arc<dyn Translator>),
    QuestionAnswerer(Arc<dyn QuestionAnswerer>),
}

impl ModelHandle {
    pub fn role(&self) -> ModelRole {
        match self {
            ModelHandle::Generator(_) => ModelRole::Generator,
            ModelHandle::Summarizer(_) => ModelRole::Summarizer,
            ModelHandle::Translator(_) => ModelRole::Translator,
            ModelHandle::QuestionAnswerer(_) => ModelRole::QuestionAnswerer,
        }
    }

    pub fn model(&self) -> &ModelId {
        match self {
            ModelHandle::Generator(h) => h.model(),
            ModelHandle::Summarizer(h) => h.model(),
            ModelHandle::Translator(h) => h.model(),
            ModelHandle::QuestionAnswerer(h) => h.model(),
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("role", &self.role())
            .field("model", self.model())
            .finish()
    }
}

/// Process-wide cache of one model handle per role
pub struct ModelRegistry {
    hub: Arc<dyn ModelHub>,
    catalog: ModelCatalog,
    generator: OnceCell<Arc<dyn TextGenerator>>,
    summarizer: OnceCell<Arc<dyn Summarizer>>,
    translator: OnceCell<Arc<dyn Translator>>,
    question_answerer: OnceCell<Arc<dyn QuestionAnswerer>>,
}

impl ModelRegistry {
    pub fn new(hub: Arc<dyn ModelHub>, catalog: ModelCatalog) -> Self {
        Self {
            hub,
            catalog,
            generator: OnceCell::new(),
            summarizer: OnceCell::new(),
            translator: OnceCell::new(),
            question_answerer: OnceCell::new(),
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Return the cached handle for `role`, loading it on first use
    pub async fn get_handle(&self, role: ModelRole) -> Result<ModelHandle, RegistryError> {
        Ok(match role {
            ModelRole::Generator => ModelHandle::Generator(self.generator().await?),
            ModelRole::Summarizer => ModelHandle::Summarizer(self.summarizer().await?),
            ModelRole::Translator => ModelHandle::Translator(self.translator().await?),
            ModelRole::QuestionAnswerer => {
                ModelHandle::QuestionAnswerer(self.question_answerer().await?)
            }
        })
    }

    pub async fn generator(&self) -> Result<Arc<dyn TextGenerator>, RegistryError> {
        let model = self.catalog.model_for(ModelRole::Generator);
        self.cached(
            ModelRole::Generator,
            &self.generator,
            self.hub.load_generator(model),
        )
        .await
    }

    pub async fn summarizer(&self) -> Result<Arc<dyn Summarizer>, RegistryError> {
        let model = self.catalog.model_for(ModelRole::Summarizer);
        self.cached(
            ModelRole::Summarizer,
            &self.summarizer,
            self.hub.load_summarizer(model),
        )
        .await
    }

    pub async fn translator(&self) -> Result<Arc<dyn Translator>, RegistryError> {
        let model = self.catalog.model_for(ModelRole::Translator);
        self.cached(
            ModelRole::Translator,
            &self.translator,
            self.hub.load_translator(model),
        )
        .await
    }

    pub async fn question_answerer(&self) -> Result<Arc<dyn QuestionAnswerer>, RegistryError> {
        let model = self.catalog.model_for(ModelRole::QuestionAnswerer);
        self.cached(
            ModelRole::QuestionAnswerer,
            &self.question_answerer,
            self.hub.load_question_answerer(model),
        )
        .await
    }

    /// Whether the handle for `role` has been constructed
    pub fn is_loaded(&self, role: ModelRole) -> bool {
        match role {
            ModelRole::Generator => self.generator.initialized(),
            ModelRole::Summarizer => self.summarizer.initialized(),
            ModelRole::Translator => self.translator.initialized(),
            ModelRole::QuestionAnswerer => self.question_answerer.initialized(),
        }
    }

    pub fn loaded_roles(&self) -> Vec<ModelRole> {
        ModelRole::ALL
            .into_iter()
            .filter(|role| self.is_loaded(*role))
            .collect()
    }

    /// Load every role eagerly, stopping at the first unavailable model
    pub async fn warm_up(&self) -> Result<(), RegistryError> {
        for role in ModelRole::ALL {
            self.get_handle(role).await?;
        }
        Ok(())
    }

    async fn cached<T: Clone>(
        &self,
        role: ModelRole,
        cell: &OnceCell<T>,
        load: impl Future<Output = Result<T, InferenceError>>,
    ) -> Result<T, RegistryError> {
        let model = self.catalog.model_for(role);
        cell.get_or_try_init(|| async {
            info!("Loading {} model {}", role, model);
            let started = Instant::now();
            let handle = load.await?;
            info!(
                "Loaded {} model {} in {} ms",
                role,
                model,
                started.elapsed().as_millis()
            );
            Ok::<T, InferenceError>(handle)
        })
        .await
        .cloned()
        .map_err(|e| {
            warn!("Failed to load {} model {}: {}", role, model, e);
            RegistryError::ModelUnavailable {
                role,
                model: model.clone(),
                reason: e.to_string(),
            }
        })
    }
}
