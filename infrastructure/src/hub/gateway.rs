//! Model hub gateway implementation
//!
//! [`HfInferenceHub`] implements the [`ModelHub`] port. Loading a handle
//! optionally checks the hub metadata so a misconfigured model id fails at
//! load time (and is retried by the registry) rather than on every request.

use crate::hub::error::{HubError, Result};
use crate::hub::handles::{
    HubEndpoint, HubQuestionAnswerer, HubSummarizer, HubTextGenerator, HubTranslator,
};
use crate::hub::protocol::{ModelInfo, classify_status, parse_body, task_matches};
use assistant_application::{
    InferenceError, ModelHub, QuestionAnswerer, Summarizer, TextGenerator, Translator,
};
use assistant_domain::{ModelId, ModelRole};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Connection settings for the hub
#[derive(Debug, Clone)]
pub struct HubSettings {
    /// Base URL of the inference API
    pub inference_url: String,
    /// Base URL of the metadata API
    pub hub_url: String,
    pub api_token: Option<String>,
    /// Applied to every HTTP request
    pub request_timeout: Duration,
    /// Check `pipeline_tag` against the role's task when loading a handle
    pub verify_models: bool,
}

impl HubSettings {
    pub const DEFAULT_INFERENCE_URL: &'static str = "https://api-inference.huggingface.co";
    pub const DEFAULT_HUB_URL: &'static str = "https://huggingface.co";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_verify_models(mut self, verify: bool) -> Self {
        self.verify_models = verify;
        self
    }

    fn validate(&self) -> Result<()> {
        for (name, url) in [("inference_url", &self.inference_url), ("hub_url", &self.hub_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(HubError::InvalidConfig(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        if self.request_timeout.is_zero() {
            return Err(HubError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            inference_url: Self::DEFAULT_INFERENCE_URL.to_string(),
            hub_url: Self::DEFAULT_HUB_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            verify_models: true,
        }
    }
}

/// Hugging Face Inference API implementation of [`ModelHub`]
pub struct HfInferenceHub {
    client: reqwest::Client,
    settings: HubSettings,
}

impl HfInferenceHub {
    pub fn new(settings: HubSettings) -> Result<Self> {
        settings.validate()?;
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(concat!("multilingual-assistant/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(
            "Model hub: inference at {}, metadata at {}{}",
            settings.inference_url,
            settings.hub_url,
            if settings.api_token.is_some() {
                " (authenticated)"
            } else {
                ""
            }
        );

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &HubSettings {
        &self.settings
    }

    pub fn model_info_url(&self, model: &ModelId) -> String {
        format!(
            "{}/api/models/{}",
            self.settings.hub_url.trim_end_matches('/'),
            model
        )
    }

    /// Fetch hub metadata for `model`
    pub async fn model_info(&self, model: &ModelId) -> Result<ModelInfo> {
        let mut builder = self.client.get(self.model_info_url(model));
        if let Some(token) = &self.settings.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(classify_status(status.as_u16(), model.as_str(), &body));
        }
        parse_body(&body)
    }

    async fn verify(&self, role: ModelRole, model: &ModelId) -> Result<()> {
        let info = self.model_info(model).await?;
        match info.pipeline_tag.as_deref() {
            Some(tag) if task_matches(role.task(), tag) => {
                debug!("Model {} serves {} as expected", model, tag);
                Ok(())
            }
            Some(tag) => Err(HubError::WrongTask {
                model: model.to_string(),
                expected: role.task(),
                actual: tag.to_string(),
            }),
            None => {
                warn!(
                    "Model {} has no pipeline_tag on the hub; assuming it serves {}",
                    model,
                    role.task()
                );
                Ok(())
            }
        }
    }

    async fn prepare(&self, role: ModelRole, model: &ModelId) -> Result<HubEndpoint> {
        if self.settings.verify_models {
            self.verify(role, model).await?;
        }
        Ok(HubEndpoint::new(
            self.client.clone(),
            &self.settings.inference_url,
            self.settings.api_token.clone(),
            model.clone(),
        ))
    }
}

#[async_trait]
impl ModelHub for HfInferenceHub {
    async fn load_generator(
        &self,
        model: &ModelId,
    ) -> std::result::Result<Arc<dyn TextGenerator>, InferenceError> {
        let endpoint = self.prepare(ModelRole::Generator, model).await?;
        Ok(Arc::new(HubTextGenerator::new(endpoint)))
    }

    async fn load_summarizer(
        &self,
        model: &ModelId,
    ) -> std::result::Result<Arc<dyn Summarizer>, InferenceError> {
        let endpoint = self.prepare(ModelRole::Summarizer, model).await?;
        Ok(Arc::new(HubSummarizer::new(endpoint)))
    }

    async fn load_translator(
        &self,
        model: &ModelId,
    ) -> std::result::Result<Arc<dyn Translator>, InferenceError> {
        let endpoint = self.prepare(ModelRole::Translator, model).await?;
        Ok(Arc::new(HubTranslator::new(endpoint)))
    }

    async fn load_question_answerer(
        &self,
        model: &ModelId,
    ) -> std::result::Result<Arc<dyn QuestionAnswerer>, InferenceError> {
        let endpoint = self.prepare(ModelRole::QuestionAnswerer, model).await?;
        Ok(Arc::new(HubQuestionAnswerer::new(endpoint)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_domain::{GenerationParams, SummarizationParams, TranslationDirection};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve canned `(status, body)` responses, one per connection, in order.
    /// Returns the base URL.
    async fn canned_server(responses: Vec<(u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        format!("http://{addr}")
    }

    /// Drain headers and a `content-length` body
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn settings(base: &str, verify: bool) -> HubSettings {
        HubSettings {
            inference_url: base.to_string(),
            hub_url: base.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(5),
            verify_models: verify,
        }
    }

    fn model(id: &str) -> ModelId {
        ModelId::new(id).unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = HubSettings::default();
        assert_eq!(settings.inference_url, "https://api-inference.huggingface.co");
        assert_eq!(settings.hub_url, "https://huggingface.co");
        assert_eq!(settings.request_timeout, Duration::from_secs(120));
        assert!(settings.verify_models);
        assert!(settings.api_token.is_none());
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let settings = HubSettings::default().with_api_token(Some("  ".to_string()));
        assert!(settings.api_token.is_none());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut settings = HubSettings::default();
        settings.inference_url = "ftp://models.example".to_string();
        assert!(matches!(
            HfInferenceHub::new(settings),
            Err(HubError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_model_info_url() {
        let hub = HfInferenceHub::new(HubSettings::default()).unwrap();
        assert_eq!(
            hub.model_info_url(&model("facebook/bart-large-cnn")),
            "https://huggingface.co/api/models/facebook/bart-large-cnn"
        );
    }

    #[tokio::test]
    async fn test_load_without_verification_makes_no_request() {
        let hub = HfInferenceHub::new(settings("http://127.0.0.1:9", false)).unwrap();
        let generator = hub
            .load_generator(&model("Qwen/Qwen2.5-3B-Instruct"))
            .await
            .unwrap();
        assert_eq!(generator.model().as_str(), "Qwen/Qwen2.5-3B-Instruct");
    }

    #[tokio::test]
    async fn test_load_verifies_pipeline_tag() {
        let base = canned_server(vec![
            (200, r#"{"id": "Helsinki-NLP/opus-mt-tc-big-en-fr", "pipeline_tag": "translation"}"#),
            (200, r#"{"id": "gpt2", "pipeline_tag": "text-generation"}"#),
        ])
        .await;
        let hub = HfInferenceHub::new(settings(&base, true)).unwrap();

        assert!(
            hub.load_translator(&model("Helsinki-NLP/opus-mt-tc-big-en-fr"))
                .await
                .is_ok()
        );

        let err = hub.load_summarizer(&model("gpt2")).await.err().unwrap();
        assert!(matches!(err, InferenceError::ModelNotAvailable(_)));
        assert!(err.to_string().contains("summarization"));
    }

    #[tokio::test]
    async fn test_unknown_model_is_unavailable() {
        let base = canned_server(vec![(404, r#"{"error": "Repository not found"}"#)]).await;
        let hub = HfInferenceHub::new(settings(&base, true)).unwrap();

        let err = hub
            .load_question_answerer(&model("acme/missing"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, InferenceError::ModelNotAvailable(_)));
    }

    #[tokio::test]
    async fn test_inference_round_trip_through_handles() {
        let base = canned_server(vec![
            (200, r#"[{"generated_text": "Tides follow the moon."}]"#),
            (200, r#"[{"summary_text": "Tides follow the moon."}]"#),
            (200, r#"[{"translation_text": "Les marées suivent la lune."}]"#),
            (200, r#"{"answer": "the moon", "score": 0.93, "start": 13, "end": 21}"#),
        ])
        .await;
        let hub = HfInferenceHub::new(settings(&base, false)).unwrap();

        let generator = hub.load_generator(&model("gpt2")).await.unwrap();
        let summarizer = hub.load_summarizer(&model("bart")).await.unwrap();
        let translator = hub.load_translator(&model("opus")).await.unwrap();
        let qa = hub.load_question_answerer(&model("roberta")).await.unwrap();

        let text = generator
            .generate("Write about tides.", &GenerationParams::DEFAULT)
            .await
            .unwrap();
        assert_eq!(text, "Tides follow the moon.");

        let summary = summarizer
            .summarize(&text, &SummarizationParams::DEFAULT)
            .await
            .unwrap();
        assert_eq!(summary, "Tides follow the moon.");

        let translated = translator
            .translate(&summary, TranslationDirection::EN_TO_FR)
            .await
            .unwrap();
        assert_eq!(translated, "Les marées suivent la lune.");

        let answer = qa.answer("What do tides follow?", &text).await.unwrap();
        assert_eq!(answer.answer, "the moon");
    }

    #[tokio::test]
    async fn test_loading_model_maps_to_unavailable() {
        let base = canned_server(vec![(
            503,
            r#"{"error": "Model facebook/bart-large-cnn is currently loading", "estimated_time": 20.0}"#,
        )])
        .await;
        let hub = HfInferenceHub::new(settings(&base, false)).unwrap();
        let summarizer = hub.load_summarizer(&model("facebook/bart-large-cnn")).await.unwrap();

        let err = summarizer
            .summarize("Some text.", &SummarizationParams::DEFAULT)
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::ModelNotAvailable(_)));
    }
}
