//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every stage
    Full,
    /// The response as JSON, exactly as the HTTP endpoint returns it
    Json,
}

/// Format of the diagnostic log on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// CLI arguments for multilingual-assistant
#[derive(Parser, Debug)]
#[command(name = "multilingual-assistant")]
#[command(author, version, about = "Generate, summarize, translate and answer questions about a topic")]
#[command(long_about = r#"
multilingual-assistant runs a four-stage inference pipeline on a topic:

1. Generate: a model writes a short paragraph about the topic
2. Summarize: the paragraph is condensed
3. Translate: the summary is translated into French
4. Answer: your question is answered extractively from the paragraph

Configuration files are loaded from (in priority order):
1. ASSISTANT_* environment variables
2. --config <path>     Explicit config file
3. ./assistant.toml    Project-level config
4. ~/.config/multilingual-assistant/config.toml   Global config

Example:
  multilingual-assistant serve --port 8000
  multilingual-assistant run --topic "ocean currents" --question "What drives ocean currents?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,

    /// Diagnostic log format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,
}

impl Cli {
    /// The subcommand, `serve` when none was given
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve(ServeArgs),
    /// Run the pipeline once and print the response
    Run(RunArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Load every model before accepting requests (overrides pipeline.warm_up)
    #[arg(long)]
    pub warm_up: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Topic to write about
    #[arg(short, long)]
    pub topic: String,

    /// Question to answer from the generated text
    #[arg(short, long)]
    pub question: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Suppress progress indicators
    #[arg(long)]
    pub quiet: bool,
}
