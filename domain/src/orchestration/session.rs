//! Workflow session entity

use super::response::AgentResponse;
use super::state::WorkflowState;
use crate::core::error::DomainError;
use crate::core::task::Task;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_session_id(started_at: DateTime<Utc>) -> String {
    let seq = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("rt-{}-{seq}", started_at.format("%Y%m%d%H%M%S"))
}

/// A single workflow run: the task under review, the state machine position
/// and every response collected so far.
#[derive(Debug, Clone)]
pub struct WorkflowSession {
    id: String,
    task: Task,
    state: WorkflowState,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    responses: Vec<AgentResponse>,
}

impl WorkflowSession {
    pub fn new(task: Task) -> Self {
        let started_at = Utc::now();
        Self {
            id: next_session_id(started_at),
            task,
            state: WorkflowState::Init,
            started_at,
            finished_at: None,
            responses: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn responses(&self) -> &[AgentResponse] {
        &self.responses
    }

    /// Move to the next state. Terminal states cannot be left.
    pub fn transition(&mut self, state: WorkflowState) -> Result<(), DomainError> {
        if self.state.is_terminal() {
            return Err(DomainError::WorkflowError(format!(
                "cannot leave terminal state {}",
                self.state
            )));
        }
        self.state = state;
        if state.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        Ok(())
    }

    /// Mark the session failed from any non-terminal state.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = WorkflowState::Failed;
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn record_response(&mut self, response: AgentResponse) {
        self.responses.push(response);
    }

    /// Distinct agent names that contributed at least one response.
    pub fn agents_consulted(&self) -> Vec<String> {
        let mut names = Vec::new();
        for response in &self.responses {
            if !names.contains(&response.agent_name) {
                names.push(response.agent_name.clone());
            }
        }
        names
    }

    pub fn duration_ms(&self) -> i64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds()
    }
}
