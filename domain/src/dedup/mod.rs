//! Deduplication subdomain.
//!
//! - [`similarity`] — token-overlap near-duplicate detection
//! - [`registry::SessionRegistry`] — per-session agent-use and phase bookkeeping

pub mod registry;
pub mod similarity;

pub use registry::{DistributionStats, SessionRegistry};
pub use similarity::token_overlap;
