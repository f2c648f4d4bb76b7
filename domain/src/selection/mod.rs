//! Agent selection subdomain.
//!
//! - [`scorer`] — weighted relevance scoring of one agent against a profile
//! - [`selector::select_agents`] — ranked, leadership-guaranteed, balanced selection
//! - [`teams`] — advisory role-based team buckets and coverage metrics

pub mod scorer;
pub mod selector;
pub mod teams;

pub use scorer::{covers_domain, score_agent, AgentScore};
pub use selector::{select_agents, ScoredAgent, SelectionCriteria, SelectionResult};
pub use teams::{CoverageMetrics, TeamKind, Teams};
