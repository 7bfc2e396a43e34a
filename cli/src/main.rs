//! CLI entrypoint for multilingual-assistant
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use assistant_application::{
    ModelRegistry, NoProgress, ProgressNotifier, RunAssistantUseCase,
};
use assistant_domain::AssistantRequest;
use assistant_infrastructure::{
    ConfigLoader, FileConfig, HfInferenceHub, JsonlRunLogger, Severity,
};
use assistant_presentation::{
    AppState, Cli, Command, ConsoleFormatter, LogFormat, OutputFormat, ProgressReporter, RunArgs,
    ServeArgs, SimpleProgress, create_router,
};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let command = cli.resolved_command();

    // The server logs its lifecycle at info even without -v
    let verbosity = match command {
        Command::Serve(_) => cli.verbose.max(1),
        Command::Run(_) => cli.verbose,
    };
    init_logging(verbosity, cli.log_format);

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    check_config(&config)?;

    // === Dependency Injection ===
    let use_case = Arc::new(build_use_case(&config)?);

    match command {
        Command::Serve(args) => {
            serve(&config, args, use_case).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Run(args) => run_once(args, &use_case).await,
    }
}

/// Initialize logging: `RUST_LOG` if set, otherwise the `-v` count
fn init_logging(verbose: u8, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Log every config issue and refuse to start on errors
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("Config: {}", issue),
            Severity::Warning => warn!("Config: {}", issue),
        }
    }

    if FileConfig::has_errors(&issues) {
        let errors: Vec<String> = issues
            .iter()
            .filter(|i| i.is_error())
            .map(ToString::to_string)
            .collect();
        bail!("Invalid configuration: {}", errors.join("; "));
    }
    Ok(())
}

fn build_use_case(config: &FileConfig) -> Result<RunAssistantUseCase> {
    let (catalog, _) = config.models.to_catalog();
    let hub = HfInferenceHub::new(config.hub.to_settings())
        .context("Failed to create model hub client")?;
    let registry = Arc::new(ModelRegistry::new(Arc::new(hub), catalog));

    let mut use_case =
        RunAssistantUseCase::new(registry).with_config(config.pipeline.to_pipeline_config());

    if let Some(path) = config.logging.run_log_path() {
        match JsonlRunLogger::new(&path) {
            Some(logger) => {
                info!("Run log: {}", path.display());
                use_case = use_case.with_logger(Arc::new(logger));
            }
            None => warn!("Run log disabled: could not open {}", path.display()),
        }
    }

    Ok(use_case)
}

async fn serve(
    config: &FileConfig,
    args: ServeArgs,
    use_case: Arc<RunAssistantUseCase>,
) -> Result<()> {
    if args.warm_up || config.pipeline.warm_up {
        info!("Warming up models...");
        use_case
            .registry()
            .warm_up()
            .await
            .context("Model warm-up failed")?;
    }

    let shutdown = CancellationToken::new();
    let state = AppState::new(use_case, config.server.max_concurrent_requests)
        .with_shutdown(shutdown.clone());
    let app = create_router(state);

    let addr = config
        .server
        .clone()
        .with_overrides(args.host, args.port)
        .bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM, then cancel in-flight runs
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
    shutdown.cancel();
}

async fn run_once(args: RunArgs, use_case: &RunAssistantUseCase) -> Result<ExitCode> {
    let request = AssistantRequest::new(args.topic, args.question)?;

    // Ctrl+C stops the run at the next stage boundary
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let progress: Box<dyn ProgressNotifier> = if args.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    match use_case
        .execute_cancellable(request, progress.as_ref(), &cancel)
        .await
    {
        Ok(response) => {
            let output = match args.output {
                OutputFormat::Full => ConsoleFormatter::format(&response),
                OutputFormat::Json => ConsoleFormatter::format_json(&response),
            };
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}
