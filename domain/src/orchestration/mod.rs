//! Workflow orchestration subdomain.
//!
//! - [`phase`] — the four fixed review phases
//! - [`state`] — the workflow state machine
//! - [`config`] — tunable workflow parameters
//! - [`session::WorkflowSession`] — one run and its collected responses
//! - [`response::AgentResponse`] — a single agent contribution
//! - [`report::WorkflowReport`] — the final envelope handed to presentation

pub mod config;
pub mod phase;
pub mod report;
pub mod response;
pub mod session;
pub mod state;

pub use config::WorkflowConfig;
pub use phase::Phase;
pub use report::{ReportMetadata, ReportMetrics, WorkflowReport};
pub use response::AgentResponse;
pub use session::WorkflowSession;
pub use state::WorkflowState;
