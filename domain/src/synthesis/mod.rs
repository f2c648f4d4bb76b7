//! Consensus synthesis subdomain.
//!
//! Turns heterogeneous free-text agent responses into a structured report:
//!
//! - [`extraction`] — rule-based per-response extraction behind a trait seam
//! - [`consensus`] — theme agreement and recommendation clustering
//! - [`divergence`] — conflicting-view detection inside concern categories
//! - [`risk`] — risk register with severity, likelihood and mitigations
//! - [`opportunity`] — ranked improvement opportunities
//! - [`roadmap`] — recommendations bucketed into delivery phases
//! - [`report`] — the synthesizer assembling the final [`report::ConsensusReport`]

pub mod consensus;
pub mod divergence;
pub mod extraction;
pub mod opportunity;
pub mod report;
pub mod risk;
pub mod roadmap;

pub use consensus::{ConsensusAnalysis, RecommendationCluster, ThemeConsensus};
pub use divergence::Divergence;
pub use extraction::{
    Concern, ConcernCategory, Extraction, KeywordExtractor, Priority, Recommendation,
    RecommendationCategory, ResponseExtractor, Sentiment, ThemeCategory,
};
pub use opportunity::Opportunity;
pub use report::{ActionPlan, ConfidenceMetrics, ConsensusReport, Synthesizer};
pub use risk::{Risk, RiskCategory, RiskRegister};
pub use roadmap::{Roadmap, RoadmapPhase};
