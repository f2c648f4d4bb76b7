//! Progress notification port
//!
//! Defines the interface for reporting progress during a workflow run.

use roundtable_domain::{AgentResponse, Phase, WorkflowState};

/// Callback for progress updates during workflow execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.). All methods
/// are fire-and-forget: implementations must not fail, and the workflow
/// never waits on them.
pub trait ProgressNotifier: Send + Sync {
    /// Called on every workflow state transition
    fn on_state_change(&self, state: WorkflowState);

    /// Called when a phase starts, with the number of agents in its bucket
    fn on_phase_start(&self, phase: Phase, total_agents: usize);

    /// Called for every recorded response within a phase
    fn on_agent_response(&self, response: &AgentResponse);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: Phase);

    /// Called when the analysis round triggers a strategy adjustment
    fn on_strategy_pivot(&self, _message: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_state_change(&self, _state: WorkflowState) {}
    fn on_phase_start(&self, _phase: Phase, _total_agents: usize) {}
    fn on_agent_response(&self, _response: &AgentResponse) {}
    fn on_phase_complete(&self, _phase: Phase) {}
}
