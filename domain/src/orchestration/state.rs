//! Workflow state machine

use super::phase::Phase;
use serde::{Deserialize, Serialize};

/// State of a roundtable workflow
///
/// The workflow always advances in this order:
/// Init -> DocumentAnalysis -> AgentSelection -> Phase(..) -> Synthesis -> Done.
/// Failed is terminal and may be entered from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Init,
    DocumentAnalysis,
    AgentSelection,
    Phase(Phase),
    Synthesis,
    Done,
    Failed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &str {
        match self {
            WorkflowState::Init => "init",
            WorkflowState::DocumentAnalysis => "document_analysis",
            WorkflowState::AgentSelection => "agent_selection",
            WorkflowState::Phase(phase) => phase.as_str(),
            WorkflowState::Synthesis => "synthesis",
            WorkflowState::Done => "done",
            WorkflowState::Failed => "failed",
        }
    }

    /// Whether the workflow has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Done | WorkflowState::Failed)
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(WorkflowState::Done.is_terminal());
        assert!(WorkflowState::Failed.is_terminal());
        assert!(!WorkflowState::Init.is_terminal());
        assert!(!WorkflowState::Phase(Phase::Analysis).is_terminal());
    }

    #[test]
    fn test_phase_state_as_str() {
        assert_eq!(WorkflowState::Phase(Phase::Design).as_str(), "design");
        assert_eq!(WorkflowState::DocumentAnalysis.as_str(), "document_analysis");
    }
}
