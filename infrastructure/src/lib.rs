//! Infrastructure layer for multilingual-assistant
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the model hub over HTTP, configuration
//! file loading and the JSONL run log.

pub mod config;
pub mod hub;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileHubConfig, FileLoggingConfig, FileModelsConfig,
    FilePipelineConfig, FileServerConfig, Severity,
};
pub use hub::{
    error::{HubError, Result},
    gateway::{HfInferenceHub, HubSettings},
};
pub use logging::JsonlRunLogger;
