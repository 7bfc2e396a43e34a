//! Progress notification port
//!
//! Defines the interface for reporting progress during a pipeline run.

use assistant_domain::Stage;

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer. With parallel branches
/// enabled, `summarize`/`translate` and `answer` callbacks may interleave.
pub trait ProgressNotifier: Send + Sync {
    /// Called once before the first stage
    fn on_run_start(&self, _total_stages: usize) {}

    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage);

    /// Called when a stage finishes, successfully or not
    fn on_stage_complete(&self, stage: Stage, success: bool);

    /// Called once after the run succeeded or failed
    fn on_run_complete(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage) {}
    fn on_stage_complete(&self, _stage: Stage, _success: bool) {}
}
