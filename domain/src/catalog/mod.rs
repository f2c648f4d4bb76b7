//! Agent catalog subdomain.
//!
//! - [`profile::AgentProfile`] — a specialist agent with role and capabilities
//! - [`roster::AgentCatalog`] — the built-in roster and lookup helpers

pub mod profile;
pub mod roster;

pub use profile::{AgentProfile, ExpertiseArea};
pub use roster::AgentCatalog;
