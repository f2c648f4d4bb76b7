//! Vendor CLI provider adapter
//!
//! Shells out to a one-shot CLI (`claude -p`, `gemini`, ...) per request,
//! writing the composed prompt to stdin and reading the completion from
//! stdout. A fixed timeout treats slow invocations as failures so the
//! routing gateway can move down the fallback chain.

use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use roundtable_application::ports::provider_gateway::GatewayError;
use roundtable_domain::prompt::Prompt;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Default wall-clock budget per CLI invocation
pub const CLI_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for one CLI-backed provider
#[derive(Debug, Clone)]
pub struct CliProviderConfig {
    /// Binary to invoke, resolved through PATH
    pub command: String,
    /// Arguments placed before the prompt is piped in
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl CliProviderConfig {
    pub fn new(command: impl Into<String>, args: &[&str]) -> Self {
        Self {
            command: command.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout: CLI_TIMEOUT,
        }
    }
}

pub struct CliProviderAdapter {
    kind: ProviderKind,
    config: CliProviderConfig,
}

impl CliProviderAdapter {
    pub fn new(kind: ProviderKind, config: CliProviderConfig) -> Self {
        Self { kind, config }
    }

    async fn invoke(&self, input: &str) -> Result<String, GatewayError> {
        let mut command = Command::new(&self.config.command);
        command
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| {
            GatewayError::ProviderUnavailable(format!(
                "failed to spawn {}: {e}",
                self.config.command
            ))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).await.map_err(|e| {
                GatewayError::ProviderError(format!("failed to write prompt: {e}"))
            })?;
            // Close stdin so the CLI sees EOF
            drop(stdin);
        }

        let output = child.wait_with_output().await.map_err(|e| {
            GatewayError::ProviderError(format!("{} did not finish: {e}", self.config.command))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(provider = self.kind.as_str(), "CLI exited with {}: {}", output.status, stderr.trim());
            return Err(GatewayError::ProviderError(format!(
                "{} exited with {}",
                self.config.command, output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(GatewayError::ProviderError(format!(
                "{} produced no output",
                self.config.command
            )));
        }
        Ok(text)
    }
}

#[async_trait]
impl ProviderAdapter for CliProviderAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn enabled(&self) -> bool {
        which::which(&self.config.command).is_ok()
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        let input = format!("{}\n\n{}", prompt.system, prompt.user);
        debug!(
            provider = self.kind.as_str(),
            command = %self.config.command,
            "Invoking CLI provider"
        );
        tokio::time::timeout(self.config.timeout, self.invoke(&input))
            .await
            .map_err(|_| GatewayError::ProviderTimeout(self.config.command.clone()))?
    }
}
