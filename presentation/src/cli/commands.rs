//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored console report
    Text,
    /// JSON output
    Json,
    /// Markdown report
    Markdown,
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Expert panel - AI agents review a document and reach consensus")]
#[command(long_about = r#"
Roundtable convenes a panel of expert agents to review a technical document.

The run proceeds through four phases:
1. Analysis:       agents examine the document from their specialty
2. Design:         architecture and structure feedback
3. Implementation: build and delivery feedback
4. Validation:     final verification pass

Each agent is routed to its preferred provider (Claude, Gemini or
OpenRouter) with automatic fallback; with no provider available an
offline stub keeps the run alive. Responses are deduplicated and
synthesized into a consensus report.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./roundtable.toml     Project-level config
3. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable whitepaper.md
  roundtable --batch --max-agents 5 design-doc.md
  cat rfc.md | roundtable -f json -
"#)]
pub struct Cli {
    /// Document to review: a file path, or `-` to read stdin
    pub document: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Dispatch each phase as one batched request per provider
    #[arg(long)]
    pub batch: bool,

    /// Maximum number of agents on the panel
    #[arg(long, value_name = "N")]
    pub max_agents: Option<usize>,

    /// Minimum selection score an agent needs to join the panel
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<f64>,

    /// Write a JSONL session transcript to the given path
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Append diagnostic logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}
