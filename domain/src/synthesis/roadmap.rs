//! Phased implementation roadmap assembled from recommendations

use super::extraction::Recommendation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapStage {
    Planning,
    Prototype,
    Development,
    Testing,
    Deployment,
}

impl RoadmapStage {
    pub fn all() -> [RoadmapStage; 5] {
        [
            RoadmapStage::Planning,
            RoadmapStage::Prototype,
            RoadmapStage::Development,
            RoadmapStage::Testing,
            RoadmapStage::Deployment,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoadmapStage::Planning => "planning",
            RoadmapStage::Prototype => "prototype",
            RoadmapStage::Development => "development",
            RoadmapStage::Testing => "testing",
            RoadmapStage::Deployment => "deployment",
        }
    }

    /// Duration band in weeks (min, max)
    pub fn duration_weeks(&self) -> (u32, u32) {
        match self {
            RoadmapStage::Planning => (2, 4),
            RoadmapStage::Prototype => (4, 8),
            RoadmapStage::Development => (8, 16),
            RoadmapStage::Testing => (2, 4),
            RoadmapStage::Deployment => (1, 2),
        }
    }

    fn keywords(&self) -> &[&str] {
        match self {
            RoadmapStage::Planning => &["plan", "design", "architect", "research", "evaluate"],
            RoadmapStage::Prototype => &["prototype", "proof of concept", "poc", "spike", "experiment"],
            RoadmapStage::Development => &["implement", "build", "develop", "integrate", "migrate"],
            RoadmapStage::Testing => &["test", "validate", "verify", "audit", "review"],
            RoadmapStage::Deployment => &["deploy", "release", "launch", "rollout", "ship"],
        }
    }

    fn milestone(&self) -> &str {
        match self {
            RoadmapStage::Planning => "Approved architecture and scope baseline",
            RoadmapStage::Prototype => "Working proof of concept for the riskiest path",
            RoadmapStage::Development => "Feature-complete build on the main branch",
            RoadmapStage::Testing => "All acceptance checks passing",
            RoadmapStage::Deployment => "Live in production with rollback verified",
        }
    }

    fn deliverables(&self) -> &[&str] {
        match self {
            RoadmapStage::Planning => &["architecture document", "scope and estimate"],
            RoadmapStage::Prototype => &["prototype build", "findings writeup"],
            RoadmapStage::Development => &["production code", "integration points"],
            RoadmapStage::Testing => &["test report", "defect triage"],
            RoadmapStage::Deployment => &["release notes", "runbook"],
        }
    }

    fn required_roles(&self) -> &[&str] {
        match self {
            RoadmapStage::Planning => &["architect", "analyst"],
            RoadmapStage::Prototype => &["architect", "developer"],
            RoadmapStage::Development => &["developer", "devops engineer"],
            RoadmapStage::Testing => &["qa engineer", "security engineer"],
            RoadmapStage::Deployment => &["devops engineer"],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub stage: RoadmapStage,
    pub tasks: Vec<String>,
    pub duration_weeks: (u32, u32),
    pub milestone: String,
    pub deliverables: Vec<String>,
    pub required_roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub phases: Vec<RoadmapPhase>,
    /// Sum of phase upper bounds, in weeks
    pub estimated_total_weeks: u32,
    /// Unique roles across all phases
    pub resource_requirements: Vec<String>,
}

impl Roadmap {
    /// Bucket recommendations into the fixed five-stage plan.
    ///
    /// A recommendation lands in the first stage whose keywords it matches;
    /// no match defaults to planning.
    pub fn build(recommendations: &[Recommendation]) -> Roadmap {
        let mut phases: Vec<RoadmapPhase> = RoadmapStage::all()
            .into_iter()
            .map(|stage| RoadmapPhase {
                stage,
                tasks: Vec::new(),
                duration_weeks: stage.duration_weeks(),
                milestone: stage.milestone().to_string(),
                deliverables: stage.deliverables().iter().map(|d| d.to_string()).collect(),
                required_roles: stage.required_roles().iter().map(|r| r.to_string()).collect(),
            })
            .collect();

        for recommendation in recommendations {
            let lower = recommendation.text.to_lowercase();
            let stage = RoadmapStage::all()
                .into_iter()
                .find(|stage| stage.keywords().iter().any(|k| lower.contains(k)))
                .unwrap_or(RoadmapStage::Planning);
            if let Some(phase) = phases.iter_mut().find(|p| p.stage == stage) {
                phase.tasks.push(recommendation.text.clone());
            }
        }

        let estimated_total_weeks = phases.iter().map(|p| p.duration_weeks.1).sum();
        let mut resource_requirements: Vec<String> = Vec::new();
        for phase in &phases {
            for role in &phase.required_roles {
                if !resource_requirements.contains(role) {
                    resource_requirements.push(role.clone());
                }
            }
        }

        Roadmap { phases, estimated_total_weeks, resource_requirements }
    }
}
