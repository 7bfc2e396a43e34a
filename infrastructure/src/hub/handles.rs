//! Model handles backed by inference endpoints.
//!
//! Each handle owns a [`HubEndpoint`] for its model and translates one
//! port call into one inference request.

use crate::hub::error::HubError;
use crate::hub::protocol::{
    AnswerResponse, GeneratedTextItem, GenerationParameters, InferenceInputs, InferenceRequest,
    QuestionAnsweringParameters, SummarizationParameters, SummaryItem, TranslationItem,
    TranslationParameters, classify_status, first_item, parse_body,
};
use assistant_application::{
    InferenceError, QuestionAnswerer, RawAnswer, Summarizer, TextGenerator, Translator,
};
use assistant_domain::{GenerationParams, ModelId, SummarizationParams, TranslationDirection};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::debug;

/// Inference endpoint of a single model
#[derive(Clone)]
pub struct HubEndpoint {
    client: reqwest::Client,
    url: String,
    api_token: Option<String>,
    model: ModelId,
}

impl HubEndpoint {
    pub fn new(
        client: reqwest::Client,
        inference_url: &str,
        api_token: Option<String>,
        model: ModelId,
    ) -> Self {
        let url = format!("{}/models/{}", inference_url.trim_end_matches('/'), model);
        Self {
            client,
            url,
            api_token,
            model,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// POST one request and decode the 2xx body
    pub async fn infer<P, R>(&self, request: &InferenceRequest<'_, P>) -> Result<R, HubError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut builder = self.client.post(&self.url).json(request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            "POST {} -> {} in {} ms ({} bytes)",
            self.url,
            status.as_u16(),
            started.elapsed().as_millis(),
            body.len()
        );

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), self.model.as_str(), &body));
        }
        parse_body(&body)
    }
}

pub struct HubTextGenerator {
    endpoint: HubEndpoint,
}

impl HubTextGenerator {
    pub fn new(endpoint: HubEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl TextGenerator for HubTextGenerator {
    fn model(&self) -> &ModelId {
        self.endpoint.model()
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, InferenceError> {
        let request = InferenceRequest::new(
            InferenceInputs::Text(prompt),
            GenerationParameters::from(params),
        );
        let items: Vec<GeneratedTextItem> = self.endpoint.infer(&request).await?;
        Ok(first_item(items, "generated_text")?.generated_text)
    }
}

pub struct HubSummarizer {
    endpoint: HubEndpoint,
}

impl HubSummarizer {
    pub fn new(endpoint: HubEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl Summarizer for HubSummarizer {
    fn model(&self) -> &ModelId {
        self.endpoint.model()
    }

    async fn summarize(
        &self,
        text: &str,
        params: &SummarizationParams,
    ) -> Result<String, InferenceError> {
        let request = InferenceRequest::new(
            InferenceInputs::Text(text),
            SummarizationParameters::from(params),
        );
        let items: Vec<SummaryItem> = self.endpoint.infer(&request).await?;
        Ok(first_item(items, "summary_text")?.summary_text)
    }
}

pub struct HubTranslator {
    endpoint: HubEndpoint,
}

impl HubTranslator {
    pub fn new(endpoint: HubEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl Translator for HubTranslator {
    fn model(&self) -> &ModelId {
        self.endpoint.model()
    }

    async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
    ) -> Result<String, InferenceError> {
        let request = InferenceRequest::new(
            InferenceInputs::Text(text),
            TranslationParameters::from(direction),
        );
        let items: Vec<TranslationItem> = self.endpoint.infer(&request).await?;
        Ok(first_item(items, "translation_text")?.translation_text)
    }
}

pub struct HubQuestionAnswerer {
    endpoint: HubEndpoint,
}

impl HubQuestionAnswerer {
    pub fn new(endpoint: HubEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl QuestionAnswerer for HubQuestionAnswerer {
    fn model(&self) -> &ModelId {
        self.endpoint.model()
    }

    /// An empty list from the runtime is reported as an empty answer
    async fn answer(&self, question: &str, context: &str) -> Result<RawAnswer, InferenceError> {
        let request = InferenceRequest::new(
            InferenceInputs::QuestionContext { question, context },
            QuestionAnsweringParameters::default(),
        );
        let response: AnswerResponse = self.endpoint.infer(&request).await?;

        Ok(match response.best() {
            Some(item) => RawAnswer {
                answer: item.answer,
                score: item.score,
            },
            None => RawAnswer {
                answer: String::new(),
                score: 0.0,
            },
        })
    }
}
