//! Workflow configuration

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default maximum number of agents per workflow
pub const DEFAULT_MAX_AGENTS: usize = 15;

/// Default minimum selection score
pub const DEFAULT_MIN_SCORE: f64 = 5.0;

/// Minimum selection score applied when the document is highly complex
pub const HIGH_COMPLEXITY_MIN_SCORE: f64 = 8.0;

/// Delay inserted between agent dispatches within a phase, in milliseconds
pub const AGENT_STAGGER_MS: u64 = 300;

/// Configuration for a roundtable workflow (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Maximum number of agents to select
    pub max_agents: usize,
    /// Minimum score an agent needs to be selected
    pub min_score: f64,
    /// Guarantee at least one leadership role among the selected agents
    pub require_leadership: bool,
    /// Spread selection across expertise areas instead of pure rank order
    pub balance_expertise: bool,
    /// Dispatch each phase as one batched request per provider
    pub batch: bool,
    /// Delay between agent dispatches within a phase, in milliseconds
    pub stagger_ms: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_agents: DEFAULT_MAX_AGENTS,
            min_score: DEFAULT_MIN_SCORE,
            require_leadership: true,
            balance_expertise: true,
            batch: false,
            stagger_ms: AGENT_STAGGER_MS,
        }
    }
}

impl WorkflowConfig {
    pub fn with_max_agents(mut self, max_agents: usize) -> Self {
        self.max_agents = max_agents;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn without_leadership(mut self) -> Self {
        self.require_leadership = false;
        self
    }

    pub fn without_balance(mut self) -> Self {
        self.balance_expertise = false;
        self
    }

    pub fn with_batch(mut self) -> Self {
        self.batch = true;
        self
    }

    pub fn with_stagger(mut self, stagger_ms: u64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_agents == 0 {
            return Err(DomainError::InvalidConfig(
                "max_agents must be at least 1".to_string(),
            ));
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(DomainError::InvalidConfig(
                "min_score must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WorkflowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_agents, 15);
        assert!(config.require_leadership);
        assert!(config.balance_expertise);
        assert!(!config.batch);
    }

    #[test]
    fn test_zero_agents_rejected() {
        let config = WorkflowConfig::default().with_max_agents(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_min_score_rejected() {
        let config = WorkflowConfig::default().with_min_score(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_chain() {
        let config = WorkflowConfig::default()
            .with_max_agents(5)
            .without_leadership()
            .with_batch();
        assert_eq!(config.max_agents, 5);
        assert!(!config.require_leadership);
        assert!(config.batch);
    }
}
