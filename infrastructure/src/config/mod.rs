//! Configuration file loading for multilingual-assistant
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `ASSISTANT_*` (`__` separates sections, e.g. `ASSISTANT_SERVER__PORT`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./assistant.toml` or `./.assistant.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/multilingual-assistant/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileHubConfig, FileLoggingConfig, FileModelsConfig,
    FilePipelineConfig, FileServerConfig, Severity,
};
pub use loader::ConfigLoader;
