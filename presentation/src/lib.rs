//! Presentation layer for multilingual-assistant
//!
//! This crate contains the HTTP request boundary, CLI definitions,
//! output formatters and progress reporters.

pub mod cli;
pub mod http;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, LogFormat, OutputFormat, RunArgs, ServeArgs};
pub use http::{create_router, error::ApiError, state::AppState};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
