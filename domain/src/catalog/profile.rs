//! Agent profile value object

use crate::orchestration::phase::Phase;
use serde::{Deserialize, Serialize};

/// Expertise area an agent belongs to, derived from its role
///
/// Used for expertise balancing during selection and for deciding which
/// previous responses are relevant context for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertiseArea {
    Frontend,
    Backend,
    Data,
    Security,
    Architecture,
    Business,
    Infrastructure,
    General,
}

impl ExpertiseArea {
    pub fn as_str(&self) -> &str {
        match self {
            ExpertiseArea::Frontend => "frontend",
            ExpertiseArea::Backend => "backend",
            ExpertiseArea::Data => "data",
            ExpertiseArea::Security => "security",
            ExpertiseArea::Architecture => "architecture",
            ExpertiseArea::Business => "business",
            ExpertiseArea::Infrastructure => "infrastructure",
            ExpertiseArea::General => "general",
        }
    }

    /// Number of areas agents are grouped into, used by coverage metrics
    pub const COUNT: usize = 8;
}

impl std::fmt::Display for ExpertiseArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Profile of a specialist agent (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Stable identifier, e.g. "security-architect"
    pub id: String,
    /// Display name, e.g. "Security Architect"
    pub name: String,
    /// Role title used for phase eligibility and routing
    pub role: String,
    /// Capability keywords, lowercase
    pub capabilities: Vec<String>,
}

impl AgentProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            capabilities: Vec::new(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: &[&str]) -> Self {
        self.capabilities = capabilities.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Whether this agent carries a leadership role title
    pub fn is_leadership(&self) -> bool {
        const LEADERSHIP_MARKERS: [&str; 5] = ["Chief", "Lead", "Principal", "Head", "Director"];
        LEADERSHIP_MARKERS
            .iter()
            .any(|marker| self.role.contains(marker))
    }

    /// The expertise area this agent is grouped under
    pub fn expertise_area(&self) -> ExpertiseArea {
        let role = self.role.to_lowercase();

        if role.contains("frontend") || role.contains("ui") || role.contains("ux") {
            ExpertiseArea::Frontend
        } else if role.contains("backend") || role.contains("api") || role.contains("server") {
            ExpertiseArea::Backend
        } else if role.contains("data") || role.contains("database") || role.contains("analytics")
        {
            ExpertiseArea::Data
        } else if role.contains("security") || role.contains("penetration") {
            ExpertiseArea::Security
        } else if role.contains("architect") || role.contains("design") {
            ExpertiseArea::Architecture
        } else if role.contains("business") || role.contains("product") || role.contains("strategy")
        {
            ExpertiseArea::Business
        } else if role.contains("devops") || role.contains("cloud")
            || role.contains("infrastructure")
        {
            ExpertiseArea::Infrastructure
        } else {
            ExpertiseArea::General
        }
    }

    /// Coarse domain used when sharing previous responses between agents
    pub fn context_domain(&self) -> &'static str {
        let role = self.role.to_lowercase();
        if role.contains("frontend") {
            "frontend"
        } else if role.contains("backend") {
            "backend"
        } else if role.contains("security") {
            "security"
        } else if role.contains("data") {
            "data"
        } else {
            "general"
        }
    }

    /// Whether this agent's role fits the given workflow phase
    pub fn can_participate(&self, phase: Phase) -> bool {
        let role = self.role.to_lowercase();
        match phase {
            Phase::Analysis => {
                role.contains("analyst")
                    || role.contains("research")
                    || role.contains("architect")
                    || role.contains("lead")
            }
            Phase::Design => {
                role.contains("architect")
                    || role.contains("designer")
                    || role.contains("lead")
                    || role.contains("ux")
            }
            Phase::Implementation => {
                role.contains("developer")
                    || role.contains("engineer")
                    || role.contains("specialist")
                    || role.contains("backend")
                    || role.contains("frontend")
            }
            Phase::Validation => {
                role.contains("tester")
                    || role.contains("security")
                    || role.contains("quality")
                    || role.contains("performance")
            }
        }
    }

    /// Phases this agent is eligible for, in execution order
    pub fn eligible_phases(&self) -> Vec<Phase> {
        Phase::all()
            .into_iter()
            .filter(|phase| self.can_participate(*phase))
            .collect()
    }
}
