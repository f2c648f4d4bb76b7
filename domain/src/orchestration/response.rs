//! Agent response value objects

use super::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response from a single agent within a workflow phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Identifier of the agent that produced this response
    pub agent_id: String,
    /// Display name of the agent
    pub agent_name: String,
    /// Role of the agent
    pub agent_role: String,
    /// Phase in which the response was produced
    pub phase: Phase,
    /// The response content
    pub content: String,
    /// Provider that served the request (e.g. "claude", "openrouter")
    pub provider: String,
    /// Whether this response was produced successfully
    pub success: bool,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the response was generated locally because no provider was reachable
    #[serde(default)]
    pub offline: bool,
    /// Whether the response came out of a batched provider request
    #[serde(default)]
    pub shared: bool,
    /// Whether the response stayed too similar to another agent's after regeneration
    #[serde(default)]
    pub duplicate: bool,
    /// When the response was recorded
    pub timestamp: DateTime<Utc>,
}

impl AgentResponse {
    /// Creates a successful response from an agent.
    ///
    /// # Arguments
    /// * `agent_id` - Identifier of the responding agent
    /// * `agent_name` - Display name of the agent
    /// * `agent_role` - Role of the agent
    /// * `phase` - Phase in which the response was produced
    /// * `content` - The agent's contribution
    pub fn success(
        agent_id: impl Into<String>,
        agent_name: impl Into<String>,
        agent_role: impl Into<String>,
        phase: Phase,
        content: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_name: agent_name.into(),
            agent_role: agent_role.into(),
            phase,
            content: content.into(),
            provider: String::new(),
            success: true,
            error: None,
            offline: false,
            shared: false,
            duplicate: false,
            timestamp: Utc::now(),
        }
    }

    /// Creates a failed response indicating the agent could not contribute.
    pub fn failure(
        agent_id: impl Into<String>,
        agent_name: impl Into<String>,
        agent_role: impl Into<String>,
        phase: Phase,
        error: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_name: agent_name.into(),
            agent_role: agent_role.into(),
            phase,
            content: String::new(),
            provider: String::new(),
            success: false,
            error: Some(error.into()),
            offline: false,
            shared: false,
            duplicate: false,
            timestamp: Utc::now(),
        }
    }

    /// Records which provider served the request.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Marks the response as generated offline.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Marks the response as part of a batched provider request.
    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Flags the response as a near-duplicate of another agent's.
    pub fn with_duplicate(mut self, duplicate: bool) -> Self {
        self.duplicate = duplicate;
        self
    }

    /// Returns `true` if this response was produced successfully.
    pub fn is_success(&self) -> bool {
        self.success
    }
}
