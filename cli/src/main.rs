//! CLI entrypoint for tandem
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tandem_application::{ProcessQueryInput, ProcessQueryUseCase, StageServices};
use tandem_domain::{EntityExtractor, Query, RunOutcome};
use tandem_infrastructure::{
    ConfigLoader, FileCompletionConfig, FileConfig, InMemoryRecordStore, JsonlEventLogger,
    OpenAiCompletionService, OpenAiConfig,
};
use tandem_presentation::{
    Cli, ConsoleFormatter, JsonLinesEncoder, NoStatus, OutputFormat, ProgressReporter,
    ServerState, SimpleProgress, SseEncoder, StatusReporter, render_console, serve,
    write_encoded,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting tandem");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = load_config(&cli)?;

    let query = match cli.serve {
        Some(_) => None,
        None => match cli.question.clone().and_then(Query::try_new) {
            Some(query) => Some(query),
            None => bail!("A non-empty question is required."),
        },
    };

    // === Dependency Injection ===
    let services = stage_services(&config.completion)?;

    let store_path = cli.store.as_ref().or(config.store.path.as_ref());
    let store = Arc::new(match store_path {
        Some(path) => InMemoryRecordStore::from_json_file(path)?,
        None => InMemoryRecordStore::with_sample_data(),
    });

    let extractor = EntityExtractor::new(config.lookup.to_rules())?;

    let mut params = config.orchestration.to_params();
    if let Some(seconds) = cli.timeout {
        params = params.with_run_timeout_seconds(Some(seconds));
    }

    let mut use_case = ProcessQueryUseCase::new(services, store)
        .with_extractor(extractor)
        .with_params(params);

    if let Some(path) = &cli.event_log {
        match JsonlEventLogger::new(path) {
            Some(logger) => {
                info!("Writing event log to {}", logger.path().display());
                use_case = use_case.with_event_logger(Arc::new(logger));
            }
            None => warn!("Event log disabled: could not open {}", path.display()),
        }
    }

    let use_case = Arc::new(use_case);

    // Ctrl-C cancels in-flight runs; their streams then close without a message
    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, cancelling");
                token.cancel();
            }
        });
    }

    if let Some(addr) = cli.serve {
        serve(ServerState::new(use_case, cancellation), addr)
            .await
            .map_err(|e| anyhow!("Server on {} failed: {}", addr, e))?;
        return Ok(());
    }
    let Some(query) = query else {
        bail!("A non-empty question is required.");
    };

    let input = ProcessQueryInput::new(query.clone()).with_cancellation(cancellation);
    let (stream, handle) = use_case.spawn(input);

    match cli.output {
        OutputFormat::Text => {
            // Spinner redraws would interleave with stderr logs
            let reporter: Box<dyn StatusReporter> = if cli.quiet {
                Box::new(NoStatus)
            } else if cli.verbose > 0 && cli.log_file.is_none() {
                Box::new(SimpleProgress)
            } else {
                Box::new(ProgressReporter::new())
            };
            if let Some(message) = render_console(stream, reporter.as_ref()).await {
                if cli.quiet {
                    print!("{}", ConsoleFormatter::format_plain(&message));
                } else {
                    print!("{}", ConsoleFormatter::format_answer(query.text(), &message));
                }
            }
        }
        OutputFormat::Sse => {
            write_encoded(stream, &SseEncoder, &mut std::io::stdout()).await?;
        }
        OutputFormat::Json => {
            write_encoded(stream, &JsonLinesEncoder, &mut std::io::stdout()).await?;
        }
    }

    let outcome = handle.await?;
    info!("Run outcome: {:?}", outcome);

    if outcome == RunOutcome::Cancelled {
        bail!("Run cancelled before an answer was produced");
    }

    Ok(())
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr so stdout carries only the event stream, or to
/// `log_file` when given.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow!("Failed to open log file {}: {}", path.display(), e))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("config: {}", issue);
        }
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    Ok(config)
}

fn stage_services(config: &FileCompletionConfig) -> Result<StageServices<OpenAiCompletionService>> {
    let timeout = config.timeout_seconds.map(Duration::from_secs);
    let service = |model: &str| -> Result<Arc<OpenAiCompletionService>> {
        let openai = OpenAiConfig::from_env(&config.endpoint, &config.api_key_env, model)
            .with_timeout(timeout);
        if openai.api_key.is_none() {
            warn!(
                "{} is not set; completion calls for {} will fail",
                config.api_key_env, model
            );
        }
        Ok(Arc::new(OpenAiCompletionService::new(openai)?))
    };

    Ok(StageServices {
        style_a: service(&config.models.style_a)?,
        style_b: service(&config.models.style_b)?,
        aggregator: service(&config.models.aggregator)?,
    })
}
