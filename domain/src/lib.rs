//! Domain layer for roundtable
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Roundtable
//!
//! A roundtable is a panel of specialist agent personas reviewing one
//! document together:
//!
//! - **Classification**: the document is profiled (type, domains, complexity)
//! - **Selection**: the best-matching experts are picked from the catalog
//! - **Phased review**: analysis, design, implementation and validation
//!   rounds collect responses
//! - **Synthesis**: responses are folded into a consensus report
//!
//! Each subdomain is pure and deterministic; providers, persistence and
//! presentation live in the outer crates.

pub mod analysis;
pub mod catalog;
pub mod core;
pub mod dedup;
pub mod orchestration;
pub mod prompt;
pub mod selection;
pub mod synthesis;

// Re-export commonly used types
pub use analysis::{classify, Complexity, DocumentProfile, DocumentType, TechnicalDomain};
pub use catalog::{AgentCatalog, AgentProfile, ExpertiseArea};
pub use core::{error::DomainError, task::Task};
pub use dedup::{token_overlap, SessionRegistry};
pub use orchestration::{
    AgentResponse, Phase, WorkflowConfig, WorkflowReport, WorkflowSession, WorkflowState,
};
pub use prompt::{build_batch_prompt, build_prompt, OutputFormat, Prompt, PromptOptions};
pub use selection::{select_agents, ScoredAgent, SelectionCriteria, SelectionResult};
pub use synthesis::{ConsensusReport, KeywordExtractor, ResponseExtractor, Synthesizer};
