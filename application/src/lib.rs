//! Application layer for multilingual-assistant
//!
//! This crate contains the pipeline use case, the model registry, the stage
//! functions and the port definitions. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod stages;
pub mod use_cases;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use ports::{
    model_hub::{
        InferenceError, ModelHub, QuestionAnswerer, RawAnswer, Summarizer, TextGenerator,
        Translator,
    },
    progress::{NoProgress, ProgressNotifier},
    run_logger::{NoRunLogger, RunEvent, RunEventKind, RunLogger},
};
pub use registry::{ModelHandle, ModelRegistry, RegistryError};
pub use stages::StageError;
pub use use_cases::run_assistant::{PipelineError, RunAssistantUseCase};
