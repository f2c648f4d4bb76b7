//! Workflow phase definitions

use serde::{Deserialize, Serialize};

/// Phase of a roundtable workflow
///
/// Agents are distributed across phases by the dedup registry so that each
/// phase is staffed by agents whose role fits its concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Analysis phase - analysts, researchers, architects and leads
    Analysis,
    /// Design phase - architects, designers, leads and UX roles
    Design,
    /// Implementation phase - developers, engineers and specialists
    Implementation,
    /// Validation phase - testers, security, quality and performance roles
    Validation,
}

impl Phase {
    /// All phases in execution order
    pub fn all() -> [Phase; 4] {
        [
            Phase::Analysis,
            Phase::Design,
            Phase::Implementation,
            Phase::Validation,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Phase::Analysis => "analysis",
            Phase::Design => "design",
            Phase::Implementation => "implementation",
            Phase::Validation => "validation",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Analysis => "Analysis",
            Phase::Design => "Design",
            Phase::Implementation => "Implementation",
            Phase::Validation => "Validation",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
