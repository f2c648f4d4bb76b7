//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain/adapter
//! configuration where appropriate.

use std::collections::HashMap;
use std::time::Duration;

use roundtable_domain::WorkflowConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::providers::cli::CliProviderConfig;
use crate::providers::http::HttpProviderConfig;
use crate::providers::ProviderKind;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("max_agents cannot be 0")]
    InvalidMaxAgents,

    #[error("min_score must be a non-negative number")]
    InvalidMinScore,

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("unknown provider name: {0}")]
    UnknownProvider(String),
}

/// Per-provider request budgets
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRateLimits {
    pub requests_per_minute: u32,
    pub requests_per_day: u32,
}

impl Default for FileRateLimits {
    fn default() -> Self {
        Self {
            requests_per_minute: 20,
            requests_per_day: 1000,
        }
    }
}

/// A provider reached through a local CLI binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCliProviderConfig {
    /// Whether this provider may be routed to at all
    pub enabled: bool,
    /// Binary to invoke
    pub command: String,
    /// Arguments passed before the prompt arrives on stdin
    pub args: Vec<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileCliProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: String::new(),
            args: vec![],
            timeout_seconds: 120,
        }
    }
}

impl FileCliProviderConfig {
    pub fn to_adapter_config(&self) -> CliProviderConfig {
        CliProviderConfig {
            command: self.command.clone(),
            args: self.args.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

/// A provider reached through an OpenAI-compatible HTTP endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpProviderConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key (never the key itself)
    pub api_key_env: String,
    pub timeout_seconds: u64,
}

impl Default for FileHttpProviderConfig {
    fn default() -> Self {
        let defaults = HttpProviderConfig::default();
        Self {
            enabled: true,
            base_url: defaults.base_url,
            model: defaults.model,
            api_key_env: defaults.api_key_env,
            timeout_seconds: 120,
        }
    }
}

impl FileHttpProviderConfig {
    pub fn to_adapter_config(&self) -> HttpProviderConfig {
        HttpProviderConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key_env: self.api_key_env.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

/// Raw `[providers]` section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider used for roles with no routing entry
    pub default: String,
    /// Role substring -> provider name overrides
    pub routing: HashMap<String, String>,
    /// Request budgets shared by all providers
    pub limits: FileRateLimits,
    /// Claude CLI settings
    pub claude: FileCliProviderConfig,
    /// Gemini CLI settings
    pub gemini: FileCliProviderConfig,
    /// OpenRouter HTTP settings
    pub openrouter: FileHttpProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            default: ProviderKind::OpenRouter.as_str().to_string(),
            routing: HashMap::new(),
            limits: FileRateLimits::default(),
            claude: FileCliProviderConfig {
                command: "claude".to_string(),
                args: vec!["-p".to_string()],
                ..FileCliProviderConfig::default()
            },
            gemini: FileCliProviderConfig {
                command: "gemini".to_string(),
                args: vec!["-p".to_string()],
                ..FileCliProviderConfig::default()
            },
            openrouter: FileHttpProviderConfig::default(),
        }
    }
}

/// Raw `[workflow]` section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    pub max_agents: usize,
    pub min_score: f64,
    pub require_leadership: bool,
    pub balance_expertise: bool,
    pub batch: bool,
    pub stagger_ms: u64,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        let defaults = WorkflowConfig::default();
        Self {
            max_agents: defaults.max_agents,
            min_score: defaults.min_score,
            require_leadership: defaults.require_leadership,
            balance_expertise: defaults.balance_expertise,
            batch: defaults.batch,
            stagger_ms: defaults.stagger_ms,
        }
    }
}

impl FileWorkflowConfig {
    /// Convert into the domain workflow configuration
    pub fn to_workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            max_agents: self.max_agents,
            min_score: self.min_score,
            require_leadership: self.require_leadership,
            balance_expertise: self.balance_expertise,
            batch: self.batch,
            stagger_ms: self.stagger_ms,
        }
    }
}

/// How the final report is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Raw `[output]` section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub format: ReportFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            color: true,
        }
    }
}

/// Raw `[transcript]` section from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTranscriptConfig {
    /// Write a JSONL session transcript
    pub enabled: bool,
    /// Transcript path; defaults to `roundtable-session.jsonl` when enabled
    pub path: Option<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider settings
    pub providers: FileProvidersConfig,
    /// Workflow settings
    pub workflow: FileWorkflowConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript settings
    pub transcript: FileTranscriptConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.workflow.max_agents == 0 {
            return Err(ConfigValidationError::InvalidMaxAgents);
        }
        if !self.workflow.min_score.is_finite() || self.workflow.min_score < 0.0 {
            return Err(ConfigValidationError::InvalidMinScore);
        }
        for timeout in [
            self.providers.claude.timeout_seconds,
            self.providers.gemini.timeout_seconds,
            self.providers.openrouter.timeout_seconds,
        ] {
            if timeout == 0 {
                return Err(ConfigValidationError::InvalidTimeout);
            }
        }

        let known = |name: &str| {
            ProviderKind::all()
                .iter()
                .any(|kind| kind.as_str().eq_ignore_ascii_case(name))
        };
        if !known(&self.providers.default) {
            return Err(ConfigValidationError::UnknownProvider(
                self.providers.default.clone(),
            ));
        }
        for provider in self.providers.routing.values() {
            if !known(provider) {
                return Err(ConfigValidationError::UnknownProvider(provider.clone()));
            }
        }

        Ok(())
    }
}
