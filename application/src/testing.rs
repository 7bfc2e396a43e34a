//! Deterministic in-memory model hub.
//!
//! Used by this crate's unit tests and, through the `testing` feature, by the
//! HTTP tests of the presentation layer.

use crate::ports::model_hub::{
    InferenceError, ModelHub, QuestionAnswerer, RawAnswer, Summarizer, TextGenerator, Translator,
};
use assistant_domain::{
    GenerationParams, ModelId, ModelRole, Stage, SummarizationParams, TranslationDirection,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Ordered record of every inference call, shared by all mock handles
pub type CallLog = Arc<Mutex<Vec<Stage>>>;

pub struct MockHub {
    generated: String,
    loads: Mutex<HashMap<ModelRole, usize>>,
    failing_loads: Mutex<HashMap<ModelRole, usize>>,
    failing_stage: Option<Stage>,
    load_delay: Duration,
    call_delay: HashMap<Stage, Duration>,
    calls: CallLog,
}

impl MockHub {
    /// A hub whose generator always returns `generated`
    pub fn new(generated: impl Into<String>) -> Self {
        Self {
            generated: generated.into(),
            loads: Mutex::new(HashMap::new()),
            failing_loads: Mutex::new(HashMap::new()),
            failing_stage: None,
            load_delay: Duration::ZERO,
            call_delay: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail the next `times` loads of `role`
    pub fn failing_loads(self, role: ModelRole, times: usize) -> Self {
        self.failing_loads.lock().unwrap().insert(role, times);
        self
    }

    /// Make every inference call of `stage` fail
    pub fn failing_stage(mut self, stage: Stage) -> Self {
        self.failing_stage = Some(stage);
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn with_call_delay(mut self, stage: Stage, delay: Duration) -> Self {
        self.call_delay.insert(stage, delay);
        self
    }

    pub fn load_count(&self, role: ModelRole) -> usize {
        self.loads.lock().unwrap().get(&role).copied().unwrap_or(0)
    }

    /// Loads across every role, failed ones included
    pub fn total_loads(&self) -> usize {
        self.loads.lock().unwrap().values().sum()
    }

    pub fn calls(&self) -> Vec<Stage> {
        self.calls.lock().unwrap().clone()
    }

    async fn record_load(&self, role: ModelRole, model: &ModelId) -> Result<(), InferenceError> {
        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }
        *self.loads.lock().unwrap().entry(role).or_insert(0) += 1;

        let mut failing = self.failing_loads.lock().unwrap();
        if let Some(remaining) = failing.get_mut(&role)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(InferenceError::ModelNotAvailable(model.to_string()));
        }
        Ok(())
    }

    fn handle(&self, stage: Stage, model: &ModelId) -> MockHandle {
        MockHandle {
            stage,
            model: model.clone(),
            generated: self.generated.clone(),
            fails: self.failing_stage == Some(stage),
            delay: self.call_delay.get(&stage).copied().unwrap_or(Duration::ZERO),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl ModelHub for MockHub {
    async fn load_generator(
        &self,
        model: &ModelId,
    ) -> Result<Arc<dyn TextGenerator>, InferenceError> {
        self.record_load(ModelRole::Generator, model).await?;
        Ok(Arc::new(self.handle(Stage::Generate, model)))
    }

    async fn load_summarizer(
        &self,
        model: &ModelId,
    ) -> Result<Arc<dyn Summarizer>, InferenceError> {
        self.record_load(ModelRole::Summarizer, model).await?;
        Ok(Arc::new(self.handle(Stage::Summarize, model)))
    }

    async fn load_translator(
        &self,
        model: &ModelId,
    ) -> Result<Arc<dyn Translator>, InferenceError> {
        self.record_load(ModelRole::Translator, model).await?;
        Ok(Arc::new(self.handle(Stage::Translate, model)))
    }

    async fn load_question_answerer(
        &self,
        model: &ModelId,
    ) -> Result<Arc<dyn QuestionAnswerer>, InferenceError> {
        self.record_load(ModelRole::QuestionAnswerer, model).await?;
        Ok(Arc::new(self.handle(Stage::Answer, model)))
    }
}

/// One mock handle type serves every role; `stage` picks the behavior
pub struct MockHandle {
    stage: Stage,
    model: ModelId,
    generated: String,
    fails: bool,
    delay: Duration,
    calls: CallLog,
}

impl MockHandle {
    async fn enter(&self) -> Result<(), InferenceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls.lock().unwrap().push(self.stage);
        if self.fails {
            return Err(InferenceError::RequestFailed(format!(
                "{} runtime error",
                self.stage
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TextGenerator for MockHandle {
    fn model(&self) -> &ModelId {
        &self.model
    }

    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, InferenceError> {
        self.enter().await?;
        Ok(self.generated.clone())
    }
}

#[async_trait]
impl Summarizer for MockHandle {
    fn model(&self) -> &ModelId {
        &self.model
    }

    /// First sentence of the input
    async fn summarize(
        &self,
        text: &str,
        _params: &SummarizationParams,
    ) -> Result<String, InferenceError> {
        self.enter().await?;
        let end = text.find('.').map_or(text.len(), |i| i + 1);
        Ok(text[..end].to_string())
    }
}

#[async_trait]
impl Translator for MockHandle {
    fn model(&self) -> &ModelId {
        &self.model
    }

    async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
    ) -> Result<String, InferenceError> {
        self.enter().await?;
        Ok(format!("[{}] {}", direction.target, text))
    }
}

#[async_trait]
impl QuestionAnswerer for MockHandle {
    fn model(&self) -> &ModelId {
        &self.model
    }

    /// Longest context word that also appears in the question, else no answer
    async fn answer(&self, question: &str, context: &str) -> Result<RawAnswer, InferenceError> {
        self.enter().await?;
        let question = question.to_lowercase();
        let best = context
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 2 && question.contains(&w.to_lowercase()))
            .max_by_key(|w| w.len());

        Ok(match best {
            Some(word) => RawAnswer {
                answer: word.to_string(),
                score: 0.87,
            },
            None => RawAnswer {
                answer: String::new(),
                score: 0.0,
            },
        })
    }
}
