//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No agents matched the selection criteria")]
    NoAgents,

    #[error("All agents failed to respond")]
    AllAgentsFailed,

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Invalid workflow configuration: {0}")]
    InvalidConfig(String),

    #[error("Workflow error: {0}")]
    WorkflowError(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::NoAgents.is_cancelled());
        assert!(!DomainError::AllAgentsFailed.is_cancelled());
        assert!(!DomainError::InvalidTask("test".to_string()).is_cancelled());
    }
}
