//! Provider adapters and the routing gateway.
//!
//! Each adapter knows how to turn a composed prompt into text through one
//! backend (vendor CLI subprocess, HTTP endpoint). The [`routing`] gateway
//! owns provider preference, fallback, caching and rate limiting, and
//! terminates every chain with the deterministic offline [`stub`].

pub mod cache;
pub mod cli;
pub mod http;
pub mod rate_limit;
pub mod routing;
pub mod stub;

use std::sync::Arc;

use async_trait::async_trait;
use roundtable_application::ports::provider_gateway::GatewayError;
use roundtable_domain::prompt::Prompt;

use crate::config::file_config::FileProvidersConfig;

/// The providers the gateway can route to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    Claude,
    Gemini,
    #[default]
    OpenRouter,
}

impl ProviderKind {
    pub fn all() -> [ProviderKind; 3] {
        [ProviderKind::Claude, ProviderKind::Gemini, ProviderKind::OpenRouter]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "claude",
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenRouter => "openrouter",
        }
    }

    /// Fixed fallback order tried after this provider fails
    pub fn fallback_chain(&self) -> [ProviderKind; 2] {
        match self {
            ProviderKind::Claude => [ProviderKind::Gemini, ProviderKind::OpenRouter],
            ProviderKind::Gemini => [ProviderKind::Claude, ProviderKind::OpenRouter],
            ProviderKind::OpenRouter => [ProviderKind::Claude, ProviderKind::Gemini],
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One text-producing backend
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Whether the adapter is configured well enough to try
    fn enabled(&self) -> bool;

    /// Whether a single request may carry a whole panel's prompt
    fn supports_batch(&self) -> bool {
        false
    }

    /// Produce the completion for one prompt
    async fn complete(&self, prompt: &Prompt) -> Result<String, GatewayError>;
}

/// Build the adapter set described by the `[providers]` config section.
///
/// Providers disabled in config are skipped entirely; the routing gateway
/// treats a missing provider the same as a failed one, so the offline stub
/// still terminates every chain.
pub fn build_providers(config: &FileProvidersConfig) -> Vec<Arc<dyn ProviderAdapter>> {
    let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();
    if config.claude.enabled {
        providers.push(Arc::new(cli::CliProviderAdapter::new(
            ProviderKind::Claude,
            config.claude.to_adapter_config(),
        )));
    }
    if config.gemini.enabled {
        providers.push(Arc::new(cli::CliProviderAdapter::new(
            ProviderKind::Gemini,
            config.gemini.to_adapter_config(),
        )));
    }
    if config.openrouter.enabled {
        providers.push(Arc::new(http::HttpProviderAdapter::new(
            ProviderKind::OpenRouter,
            config.openrouter.to_adapter_config(),
        )));
    }
    providers
}
