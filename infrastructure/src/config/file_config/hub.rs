//! Model hub configuration from TOML (`[hub]` section)

use super::ConfigIssue;
use crate::hub::gateway::HubSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// # Example
///
/// ```toml
/// [hub]
/// inference_url = "https://api-inference.huggingface.co"
/// hub_url = "https://huggingface.co"
/// api_token_env = "HF_TOKEN"      # name of the variable, never the token itself
/// request_timeout_secs = 120
/// verify_models = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHubConfig {
    pub inference_url: String,
    pub hub_url: String,
    /// Environment variable holding the API token
    pub api_token_env: String,
    pub request_timeout_secs: u64,
    /// Check each model's task on the hub before first use
    pub verify_models: bool,
}

impl Default for FileHubConfig {
    fn default() -> Self {
        Self {
            inference_url: HubSettings::DEFAULT_INFERENCE_URL.to_string(),
            hub_url: HubSettings::DEFAULT_HUB_URL.to_string(),
            api_token_env: "HF_TOKEN".to_string(),
            request_timeout_secs: HubSettings::DEFAULT_TIMEOUT_SECS,
            verify_models: true,
        }
    }
}

impl FileHubConfig {
    /// Read the token from the configured environment variable
    pub fn api_token(&self) -> Option<String> {
        if self.api_token_env.trim().is_empty() {
            return None;
        }
        std::env::var(&self.api_token_env).ok()
    }

    pub fn to_settings(&self) -> HubSettings {
        HubSettings {
            inference_url: self.inference_url.clone(),
            hub_url: self.hub_url.clone(),
            api_token: None,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            verify_models: self.verify_models,
        }
        .with_api_token(self.api_token())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, url) in [
            ("hub.inference_url", &self.inference_url),
            ("hub.hub_url", &self.hub_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                issues.push(ConfigIssue::error(
                    field,
                    format!("'{url}' must start with http:// or https://"),
                ));
            }
        }
        if self.request_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                "hub.request_timeout_secs",
                "request timeout must be greater than zero",
            ));
        }
        if self.api_token().is_none() {
            issues.push(ConfigIssue::warning(
                "hub.api_token_env",
                format!(
                    "${} is not set; requests are sent unauthenticated",
                    self.api_token_env
                ),
            ));
        }
        issues
    }
}
