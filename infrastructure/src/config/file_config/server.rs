//! HTTP server configuration from TOML (`[server]` section)

use super::ConfigIssue;
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8000
/// max_concurrent_requests = 16   # in-flight pipeline runs
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
    /// Pipeline runs allowed at once; further requests wait
    pub max_concurrent_requests: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_concurrent_requests: 16,
        }
    }
}

impl FileServerConfig {
    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply `--host` / `--port` from the command line
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.host.trim().is_empty() {
            issues.push(ConfigIssue::error("server.host", "host cannot be empty"));
        }
        if self.port == 0 {
            issues.push(ConfigIssue::error("server.port", "port must be between 1 and 65535"));
        }
        if self.max_concurrent_requests == 0 {
            issues.push(ConfigIssue::error(
                "server.max_concurrent_requests",
                "must allow at least one request",
            ));
        }
        issues
    }
}
