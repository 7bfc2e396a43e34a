//! Run Assistant use case
//!
//! Orchestrates the four-stage pipeline:
//!
//! ```text
//! generate ──► summarize ──► translate
//!     └──────► answer
//! ```
//!
//! Any failure aborts the run and the first error is returned with its stage
//! tag. There is no partial response.

use crate::config::PipelineConfig;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunEventKind, RunLogger};
use crate::registry::{ModelRegistry, RegistryError};
use crate::stages::{self, StageError};
use assistant_domain::{
    AnswerResult, AssistantRequest, AssistantResponse, DomainError, ModelRole, Stage, Summary,
    TranslatedSummary,
};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

/// Errors that can occur during a pipeline run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error(transparent)]
    ModelUnavailable(#[from] RegistryError),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error("Run cancelled before stage '{before}'")]
    Cancelled { before: Stage },
}

impl PipelineError {
    /// The stage whose inference failed, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Stage(e) => Some(e.stage),
            _ => None,
        }
    }

    /// The role whose model could not be loaded, if any
    pub fn role(&self) -> Option<ModelRole> {
        match self {
            PipelineError::ModelUnavailable(e) => Some(e.role()),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PipelineError::Cancelled { .. })
    }
}

/// Per-run context threaded through every stage
struct RunContext<'a> {
    run_id: &'a str,
    progress: &'a dyn ProgressNotifier,
    cancel: &'a CancellationToken,
}

impl RunContext<'_> {
    fn checkpoint(&self, next: Stage) -> Result<(), PipelineError> {
        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled { before: next });
        }
        Ok(())
    }
}

/// Use case for running the assistant pipeline
pub struct RunAssistantUseCase {
    registry: Arc<ModelRegistry>,
    config: PipelineConfig,
    logger: Arc<dyn RunLogger>,
    next_run: AtomicU64,
}

impl RunAssistantUseCase {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self {
            registry,
            config: PipelineConfig::default(),
            logger: Arc::new(NoRunLogger),
            next_run: AtomicU64::new(1),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: AssistantRequest,
    ) -> Result<AssistantResponse, PipelineError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: AssistantRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<AssistantResponse, PipelineError> {
        self.execute_cancellable(request, progress, &CancellationToken::new())
            .await
    }

    /// Execute the use case, checking `cancel` between stages.
    ///
    /// A stage already in flight always runs to completion or failure.
    pub async fn execute_cancellable(
        &self,
        request: AssistantRequest,
        progress: &dyn ProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<AssistantResponse, PipelineError> {
        let run_id = format!("run-{}", self.next_run.fetch_add(1, Ordering::Relaxed));
        let ctx = RunContext {
            run_id: &run_id,
            progress,
            cancel,
        };
        let span = info_span!("pipeline_run", run_id = %run_id);

        async {
            let started = Instant::now();
            self.logger.log(RunEvent::new(
                &run_id,
                RunEventKind::RunStarted {
                    topic: request.topic().to_string(),
                    question: request.question().to_string(),
                },
            ));
            progress.on_run_start(Stage::ORDER.len());

            let result = self.run(&request, &ctx).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(_) => {
                    info!("Pipeline completed in {} ms", elapsed_ms);
                    self.logger.log(RunEvent::new(
                        &run_id,
                        RunEventKind::RunCompleted { elapsed_ms },
                    ));
                }
                Err(e) => {
                    warn!("Pipeline failed after {} ms: {}", elapsed_ms, e);
                    self.logger.log(RunEvent::new(
                        &run_id,
                        RunEventKind::RunFailed {
                            elapsed_ms,
                            stage: e.stage(),
                            role: e.role(),
                            error: e.to_string(),
                        },
                    ));
                }
            }
            progress.on_run_complete(result.is_ok());
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        request: &AssistantRequest,
        ctx: &RunContext<'_>,
    ) -> Result<AssistantResponse, PipelineError> {
        request.check()?;
        let params = &self.config.params;

        // Generate: the single fan-out point
        ctx.checkpoint(Stage::Generate)?;
        let generator = self.registry.generator().await?;
        let generated = self
            .run_stage(
                ctx,
                Stage::Generate,
                stages::generate(generator.as_ref(), request.topic(), &params.generation),
            )
            .await?;
        debug!("Generated {} words", generated.word_count());

        let summary_branch = async {
            ctx.checkpoint(Stage::Summarize)?;
            let summarizer = self.registry.summarizer().await?;
            let summary = self
                .run_stage(
                    ctx,
                    Stage::Summarize,
                    stages::summarize(summarizer.as_ref(), &generated, &params.summarization),
                )
                .await?;

            ctx.checkpoint(Stage::Translate)?;
            let translator = self.registry.translator().await?;
            let translated = self
                .run_stage(
                    ctx,
                    Stage::Translate,
                    stages::translate(translator.as_ref(), &summary, params.translation),
                )
                .await?;
            Ok::<(Summary, TranslatedSummary), PipelineError>((summary, translated))
        };

        let answer_branch = async {
            ctx.checkpoint(Stage::Answer)?;
            let qa = self.registry.question_answerer().await?;
            self.run_stage(
                ctx,
                Stage::Answer,
                stages::answer(qa.as_ref(), request.question(), &generated),
            )
            .await
        };

        // Blank generated text fails at summarize and answer never runs
        let parallel = self.config.parallel_branches && !generated.is_blank();

        let ((summary, translated), answer): ((Summary, TranslatedSummary), AnswerResult) =
            if parallel {
                tokio::try_join!(summary_branch, answer_branch)?
            } else {
                let summarized = summary_branch.await?;
                (summarized, answer_branch.await?)
            };

        Ok(AssistantResponse::assemble(
            request.topic(),
            request.question(),
            generated,
            summary,
            translated,
            answer,
        ))
    }

    /// Run one stage's inference with progress, timeout and run logging
    async fn run_stage<T>(
        &self,
        ctx: &RunContext<'_>,
        stage: Stage,
        call: impl Future<Output = Result<T, StageError>>,
    ) -> Result<T, PipelineError> {
        ctx.progress.on_stage_start(stage);
        let started = Instant::now();

        let result = match self.config.stage_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(StageError::timed_out(stage, limit)),
            },
            None => call.await,
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        ctx.progress.on_stage_complete(stage, result.is_ok());
        match &result {
            Ok(_) => {
                info!("Stage {} completed in {} ms", stage, elapsed_ms);
                self.logger.log(RunEvent::new(
                    ctx.run_id,
                    RunEventKind::StageCompleted { stage, elapsed_ms },
                ));
            }
            Err(e) => {
                warn!("Stage {} failed after {} ms: {}", stage, elapsed_ms, e);
                self.logger.log(RunEvent::new(
                    ctx.run_id,
                    RunEventKind::StageFailed {
                        stage,
                        elapsed_ms,
                        error: e.message.clone(),
                    },
                ));
            }
        }

        result.map_err(PipelineError::from)
    }
}
