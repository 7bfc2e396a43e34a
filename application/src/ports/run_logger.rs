//! Port for structured run logging.
//!
//! Defines the [`RunLogger`] trait for recording pipeline events (run start,
//! stage outcomes, run outcome) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! audit trail of runs (JSONL).

use assistant_domain::{ModelRole, Stage};
use serde::Serialize;

/// What happened during a run, tagged by `event` when serialized
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEventKind {
    RunStarted {
        topic: String,
        question: String,
    },
    StageCompleted {
        stage: Stage,
        elapsed_ms: u64,
    },
    StageFailed {
        stage: Stage,
        elapsed_ms: u64,
        error: String,
    },
    RunCompleted {
        elapsed_ms: u64,
    },
    RunFailed {
        elapsed_ms: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        stage: Option<Stage>,
        #[serde(skip_serializing_if = "Option::is_none")]
        role: Option<ModelRole>,
        error: String,
    },
}

impl RunEventKind {
    /// The `event` tag this kind serializes with
    pub fn name(&self) -> &'static str {
        match self {
            RunEventKind::RunStarted { .. } => "run_started",
            RunEventKind::StageCompleted { .. } => "stage_completed",
            RunEventKind::StageFailed { .. } => "stage_failed",
            RunEventKind::RunCompleted { .. } => "run_completed",
            RunEventKind::RunFailed { .. } => "run_failed",
        }
    }
}

/// One event of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct RunEvent {
    pub run_id: String,
    pub kind: RunEventKind,
}

impl RunEvent {
    pub fn new(run_id: impl Into<String>, kind: RunEventKind) -> Self {
        Self {
            run_id: run_id.into(),
            kind,
        }
    }
}

/// Port for logging run events to a structured log.
///
/// `log` is synchronous and infallible; a failed write must never fail the
/// run it describes.
pub trait RunLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRunLogger;

impl RunLogger for NoRunLogger {
    fn log(&self, _event: RunEvent) {}
}
