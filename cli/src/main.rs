//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use roundtable_application::{
    NoProgress, ProgressNotifier, RunWorkflowInput, RunWorkflowUseCase, TranscriptLogger,
};
use roundtable_domain::Task;
use roundtable_infrastructure::{
    build_providers, ConfigLoader, FileConfig, JsonlTranscriptLogger, ReportFormat,
    RoutingGateway,
};
use roundtable_presentation::{
    Cli, ConsoleFormatter, JsonFormatter, MarkdownFormatter, OutputFormat, ProgressReporter,
    SimpleProgress,
};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_logging(&cli)?;
    info!("Starting roundtable");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };
    config
        .validate()
        .context("Invalid configuration")?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    // CLI flags override file configuration
    let mut workflow = config.workflow.to_workflow_config();
    if let Some(max_agents) = cli.max_agents {
        workflow = workflow.with_max_agents(max_agents);
    }
    if let Some(min_score) = cli.min_score {
        workflow = workflow.with_min_score(min_score);
    }
    if cli.batch {
        workflow = workflow.with_batch();
    }

    // Read the document under review
    let document = read_document(cli.document.as_deref())?;
    let Some(task) = Task::try_new(document) else {
        bail!("Document is empty. Pass a file path, or pipe content via stdin.");
    };

    // === Dependency Injection ===
    let providers = build_providers(&config.providers);
    let gateway = Arc::new(RoutingGateway::new(providers, &config.providers));

    let mut use_case = RunWorkflowUseCase::new(gateway);
    if let Some(transcript) = transcript_logger(&cli, &config) {
        use_case = use_case.with_transcript(transcript);
    }

    // Ctrl-C cancels between phases; the current phase finishes first
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let input = RunWorkflowInput::new(task).with_config(workflow);
    let progress = select_progress(&cli);
    let report = use_case
        .execute_with_progress(input, progress.as_ref(), cancel)
        .await?;

    let output = match output_format(&cli, &config) {
        OutputFormat::Text => ConsoleFormatter::format(&report),
        OutputFormat::Json => JsonFormatter::format(&report),
        OutputFormat::Markdown => MarkdownFormatter::format(&report),
    };
    println!("{}", output);

    Ok(())
}

/// Initialize tracing based on verbosity level
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    if let Some(path) = &cli.log_file {
        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .context("--log-file must name a file")?;
        let appender = tracing_appender::rolling::never(directory, file_name);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(appender)
            .with_ansi(false)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
    Ok(())
}

/// Read the document from a file path, or stdin for `-` / no argument
fn read_document(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// The --transcript flag wins over the config file section
fn transcript_logger(cli: &Cli, config: &FileConfig) -> Option<Arc<dyn TranscriptLogger>> {
    let path = if let Some(path) = &cli.transcript {
        path.clone()
    } else if config.transcript.enabled {
        config
            .transcript
            .path
            .clone()
            .unwrap_or_else(|| "roundtable-session.jsonl".to_string())
            .into()
    } else {
        return None;
    };

    JsonlTranscriptLogger::new(&path).map(|logger| {
        info!(path = %path.display(), "Writing session transcript");
        Arc::new(logger) as Arc<dyn TranscriptLogger>
    })
}

fn select_progress(cli: &Cli) -> Box<dyn ProgressNotifier> {
    use std::io::IsTerminal;

    if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

fn output_format(cli: &Cli, config: &FileConfig) -> OutputFormat {
    cli.format.unwrap_or(match config.output.format {
        ReportFormat::Text => OutputFormat::Text,
        ReportFormat::Json => OutputFormat::Json,
        ReportFormat::Markdown => OutputFormat::Markdown,
    })
}
