//! Orchestration configuration from TOML (`[pipeline]` section)

use super::ConfigIssue;
use assistant_application::PipelineConfig;
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [pipeline]
/// parallel_branches = true   # run summarize→translate and answer concurrently
/// stage_timeout_secs = 0     # 0 = no timeout
/// warm_up = false            # load every model at startup
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub parallel_branches: bool,
    pub stage_timeout_secs: u64,
    pub warm_up: bool,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            parallel_branches: true,
            stage_timeout_secs: 0,
            warm_up: false,
        }
    }
}

impl FilePipelineConfig {
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_parallel_branches(self.parallel_branches)
            .with_stage_timeout_secs(self.stage_timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.stage_timeout_secs > 0 && self.stage_timeout_secs < 5 {
            issues.push(ConfigIssue::warning(
                "pipeline.stage_timeout_secs",
                format!(
                    "{}s is shorter than a typical cold model load",
                    self.stage_timeout_secs
                ),
            ));
        }
        issues
    }
}
