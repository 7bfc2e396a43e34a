//! Shared application state

use crate::http::error::ApiError;
use assistant_application::{ModelRegistry, RunAssistantUseCase};
use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio_util::sync::CancellationToken;

/// Shared application state with backpressure
#[derive(Clone)]
pub struct AppState {
    /// The orchestrator; shares the process-wide model registry
    pub use_case: Arc<RunAssistantUseCase>,
    /// Bounds in-flight pipeline runs
    pub request_semaphore: Arc<Semaphore>,
    /// Cancelled on shutdown; runs stop at the next stage boundary
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(use_case: Arc<RunAssistantUseCase>, max_concurrent_requests: usize) -> Self {
        Self {
            use_case,
            request_semaphore: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        self.use_case.registry()
    }

    /// Wait for a free pipeline slot
    pub async fn acquire_permit(&self) -> Result<SemaphorePermit<'_>, ApiError> {
        self.request_semaphore
            .acquire()
            .await
            .map_err(|_| ApiError::unavailable("server is shutting down"))
    }
}
