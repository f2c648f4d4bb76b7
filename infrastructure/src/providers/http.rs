//! HTTP provider adapter (OpenRouter-style chat completions)
//!
//! POSTs the composed prompt to an OpenAI-compatible `/chat/completions`
//! endpoint. The API key comes from an environment variable named in the
//! configuration, never from the config file itself.

use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use roundtable_application::ports::provider_gateway::GatewayError;
use roundtable_domain::prompt::Prompt;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Default wall-clock budget per HTTP request
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for one HTTP-backed provider
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    pub timeout: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "openrouter/auto".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            timeout: HTTP_TIMEOUT,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

pub struct HttpProviderAdapter {
    kind: ProviderKind,
    config: HttpProviderConfig,
    client: reqwest::Client,
}

impl HttpProviderAdapter {
    pub fn new(kind: ProviderKind, config: HttpProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self {
            kind,
            config,
            client,
        }
    }

    fn api_key(&self) -> Option<String> {
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }
}

#[async_trait]
impl ProviderAdapter for HttpProviderAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn enabled(&self) -> bool {
        self.api_key().is_some()
    }

    fn supports_batch(&self) -> bool {
        true
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        let key = self.api_key().ok_or_else(|| {
            GatewayError::ProviderUnavailable(format!("{} not set", self.config.api_key_env))
        })?;

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        debug!(provider = self.kind.as_str(), model = %self.config.model, "POST {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&json!({
                "model": self.config.model,
                "messages": [
                    { "role": "system", "content": prompt.system },
                    { "role": "user", "content": prompt.user },
                ],
            }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::ProviderTimeout(self.config.model.clone())
                } else {
                    GatewayError::ProviderUnavailable(e.to_string())
                }
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::ProviderRateLimited(self.config.model.clone()));
        }
        if !response.status().is_success() {
            return Err(GatewayError::ProviderError(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| GatewayError::ProviderError(format!("malformed response: {e}")))?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GatewayError::ProviderError("empty completion".to_string()))
    }
}
