//! Application-level configuration.
//!
//! - [`PipelineConfig`] - how a run is executed (branch parallelism, stage
//!   timeout, fixed stage parameters)

pub mod pipeline_config;

pub use pipeline_config::PipelineConfig;
