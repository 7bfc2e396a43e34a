//! Pipeline parameters - orchestration control.
//!
//! [`PipelineConfig`] groups the static parameters that control how
//! [`RunAssistantUseCase`](crate::use_cases::run_assistant::RunAssistantUseCase)
//! executes. These are application-layer concerns, not request input.

use assistant_domain::StageParams;
use std::time::Duration;

/// Orchestration control parameters.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Run the summarize→translate branch and the answer branch concurrently.
    pub parallel_branches: bool,
    /// Upper bound on a single stage's inference call.
    pub stage_timeout: Option<Duration>,
    /// Fixed generation/summarization/translation parameters.
    pub params: StageParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel_branches: true,
            stage_timeout: None,
            params: StageParams::default(),
        }
    }
}

impl PipelineConfig {
    // ==================== Builder Methods ====================

    pub fn with_parallel_branches(mut self, parallel: bool) -> Self {
        self.parallel_branches = parallel;
        self
    }

    pub fn with_stage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stage_timeout = timeout;
        self
    }

    /// Zero seconds means no timeout
    pub fn with_stage_timeout_secs(self, seconds: u64) -> Self {
        let timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        self.with_stage_timeout(timeout)
    }

    pub fn with_params(mut self, params: StageParams) -> Self {
        self.params = params;
        self
    }
}
