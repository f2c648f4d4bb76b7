//! Provider gateway port
//!
//! Defines the interface for sending composed prompts to LLM providers.

use async_trait::async_trait;
use roundtable_domain::prompt::Prompt;
use roundtable_domain::Phase;
use thiserror::Error;

/// Errors surfaced by individual provider adapters.
///
/// The gateway itself never returns these to the caller: after fallback is
/// exhausted it degrades to an offline stub answer instead. Adapters use
/// them to tell the routing layer why a provider should be skipped.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Provider timed out: {0}")]
    ProviderTimeout(String),

    #[error("Provider rate limited: {0}")]
    ProviderRateLimited(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// One agent query ready to be routed to a provider
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub agent_id: String,
    pub agent_name: String,
    pub agent_role: String,
    pub phase: Phase,
    pub prompt: Prompt,
}

/// The served answer together with routing metadata
#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub content: String,
    /// Provider that served the request (e.g. "claude", "openrouter")
    pub provider: String,
    /// True when every provider failed and a local stub answered
    pub offline: bool,
    /// True when the answer came out of a batched provider request
    pub shared: bool,
}

/// Gateway for provider communication
///
/// This port defines how the application layer reaches LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Route one agent query to the best provider.
    ///
    /// Infallible by contract: implementations fall back through their
    /// provider chain and finish with a local stub, so the workflow always
    /// gets an answer.
    async fn query_agent(&self, request: QueryRequest) -> QueryResponse;

    /// Route a whole panel as one shared request where a provider supports
    /// it. `prompt` is the aggregated panel prompt; `requests` carry the
    /// per-agent prompts used when the implementation (or its fallback)
    /// serves agents individually.
    ///
    /// The default implementation ignores the aggregated prompt and serves
    /// each request individually. Responses come back in request order.
    async fn query_batch(&self, prompt: Prompt, requests: Vec<QueryRequest>) -> Vec<QueryResponse> {
        let _ = prompt;
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.query_agent(request).await);
        }
        responses
    }
}
