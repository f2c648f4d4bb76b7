//! Advisory team buckets and coverage metrics
//!
//! Teams group the selected agents by role for reporting. They are not the
//! execution-phase assignment; that belongs to the dedup registry. A team
//! whose concern is represented in the catalog never reports empty: the
//! top-ranked selected agent is borrowed to fill it.

use super::scorer;
use super::selector::ScoredAgent;
use crate::analysis::profile::DocumentProfile;
use serde::{Deserialize, Serialize};

/// Named advisory team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamKind {
    Analysis,
    Design,
    Implementation,
    Validation,
    Optimization,
}

impl TeamKind {
    pub fn all() -> [TeamKind; 5] {
        [
            TeamKind::Analysis,
            TeamKind::Design,
            TeamKind::Implementation,
            TeamKind::Validation,
            TeamKind::Optimization,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            TeamKind::Analysis => "analysis",
            TeamKind::Design => "design",
            TeamKind::Implementation => "implementation",
            TeamKind::Validation => "validation",
            TeamKind::Optimization => "optimization",
        }
    }

    /// Role substrings that place an agent on this team
    fn role_markers(&self) -> &'static [&'static str] {
        match self {
            TeamKind::Analysis => &["Analyst", "Research", "Architect"],
            TeamKind::Design => &["Architect", "Designer", "Lead"],
            TeamKind::Implementation => &["Developer", "Engineer", "Specialist"],
            TeamKind::Validation => &["Tester", "Security", "Quality"],
            TeamKind::Optimization => &["Performance", "Optimization", "DevOps"],
        }
    }

    fn matches(&self, role: &str) -> bool {
        self.role_markers().iter().any(|marker| role.contains(marker))
    }
}

impl std::fmt::Display for TeamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One team's members, by agent id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub kind: TeamKind,
    pub members: Vec<String>,
}

/// All advisory teams of a selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teams {
    pub teams: Vec<Team>,
}

impl Teams {
    /// Bucket selected agents into teams by role, borrowing the top-ranked
    /// agent into any team that would otherwise be empty.
    pub fn form(selected: &[ScoredAgent]) -> Self {
        let teams = TeamKind::all()
            .into_iter()
            .map(|kind| {
                let mut members: Vec<String> = selected
                    .iter()
                    .filter(|s| kind.matches(&s.agent.role))
                    .map(|s| s.agent.id.clone())
                    .collect();
                if members.is_empty()
                    && let Some(top) = selected.first()
                {
                    members.push(top.agent.id.clone());
                }
                Team { kind, members }
            })
            .collect();
        Self { teams }
    }

    pub fn get(&self, kind: TeamKind) -> &[String] {
        self.teams
            .iter()
            .find(|team| team.kind == kind)
            .map(|team| team.members.as_slice())
            .unwrap_or(&[])
    }

    /// Number of teams with at least one member
    pub fn staffed_count(&self) -> usize {
        self.teams.iter().filter(|team| !team.members.is_empty()).count()
    }
}

/// Reference number of distinct capabilities a full-breadth selection spans
const CAPABILITY_REFERENCE: f64 = 50.0;

/// How well a selection covers the document's needs, all ratios in [0,1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoverageMetrics {
    /// Detected domains with at least one strong-scoring agent / detected domains
    pub domain_coverage: f64,
    /// Unique capabilities among selected agents against a fixed reference
    pub capability_coverage: f64,
    /// Staffed advisory teams / total teams
    pub phase_coverage: f64,
    /// Weighted blend of the above
    pub overall: f64,
}

impl CoverageMetrics {
    pub fn compute(selected: &[ScoredAgent], teams: &Teams, profile: &DocumentProfile) -> Self {
        let domain_coverage = if profile.domains.is_empty() {
            1.0
        } else {
            let covered = profile
                .domains
                .iter()
                .filter(|detected| {
                    selected
                        .iter()
                        .any(|s| scorer::covers_domain(&s.agent, detected.domain))
                })
                .count();
            covered as f64 / profile.domains.len() as f64
        };

        let unique_capabilities: std::collections::HashSet<&str> = selected
            .iter()
            .flat_map(|s| s.agent.capabilities.iter().map(String::as_str))
            .collect();
        let capability_coverage =
            (unique_capabilities.len() as f64 / CAPABILITY_REFERENCE).clamp(0.0, 1.0);

        let phase_coverage = teams.staffed_count() as f64 / TeamKind::all().len() as f64;

        let overall =
            (domain_coverage * 0.4 + capability_coverage * 0.3 + phase_coverage * 0.3).clamp(0.0, 1.0);

        Self {
            domain_coverage,
            capability_coverage,
            phase_coverage,
            overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify;
    use crate::catalog::profile::AgentProfile;
    use crate::catalog::AgentCatalog;
    use crate::selection::scorer::score_agent;

    fn scored(ids: &[&str]) -> Vec<ScoredAgent> {
        let catalog = AgentCatalog::builtin();
        let profile = classify("");
        ids.iter()
            .map(|id| {
                let agent = catalog.get(id).expect(id).clone();
                let score = score_agent(&agent, &profile);
                ScoredAgent { agent, score }
            })
            .collect()
    }

    #[test]
    fn test_role_bucketing() {
        let selected = scored(&["security-architect", "backend-developer", "penetration-tester"]);
        let teams = Teams::form(&selected);
        assert!(teams.get(TeamKind::Analysis).contains(&"security-architect".to_string()));
        assert!(teams.get(TeamKind::Implementation).contains(&"backend-developer".to_string()));
        assert!(teams.get(TeamKind::Validation).contains(&"penetration-tester".to_string()));
    }

    #[test]
    fn test_agent_may_appear_on_multiple_teams() {
        let selected = scored(&["security-architect"]);
        let teams = Teams::form(&selected);
        // Architect role puts it on analysis and design, Security on validation
        assert!(teams.get(TeamKind::Analysis).contains(&"security-architect".to_string()));
        assert!(teams.get(TeamKind::Design).contains(&"security-architect".to_string()));
        assert!(teams.get(TeamKind::Validation).contains(&"security-architect".to_string()));
    }

    #[test]
    fn test_empty_team_borrows_top_agent() {
        let selected = scored(&["business-analyst", "product-manager"]);
        let teams = Teams::form(&selected);
        // No performance role selected; the top-ranked agent fills in
        assert_eq!(teams.get(TeamKind::Optimization), &["business-analyst".to_string()]);
        assert_eq!(teams.staffed_count(), 5);
    }

    #[test]
    fn test_no_selection_leaves_teams_empty() {
        let teams = Teams::form(&[]);
        assert_eq!(teams.staffed_count(), 0);
    }

    #[test]
    fn test_coverage_bounds() {
        let selected = scored(&["security-architect", "backend-developer"]);
        let teams = Teams::form(&selected);
        let profile = classify("");
        let coverage = CoverageMetrics::compute(&selected, &teams, &profile);
        for ratio in [
            coverage.domain_coverage,
            coverage.capability_coverage,
            coverage.phase_coverage,
            coverage.overall,
        ] {
            assert!((0.0..=1.0).contains(&ratio), "{ratio} out of bounds");
        }
    }

    #[test]
    fn test_uncovered_domain_lowers_domain_coverage() {
        let profile = classify(&format!(
            "# Protocol Security Review\n\n## Abstract\n\n{}",
            "The blockchain smart contract ledger needs a security audit: \
             penetration testing, cryptography review and compliance checks \
             for the decentralized token protocol. "
                .repeat(6)
        ));
        assert!(profile.domains.len() >= 2, "need two detected domains");

        // Covers blockchain through its capabilities, but not security
        let agent = AgentProfile::new("chain-reviewer", "Chain Reviewer", "Blockchain Specialist")
            .with_capabilities(&["smart contract design", "defi protocols"]);
        let score = score_agent(&agent, &profile);
        let selected = vec![ScoredAgent { agent, score }];

        let teams = Teams::form(&selected);
        let coverage = CoverageMetrics::compute(&selected, &teams, &profile);
        assert!(coverage.domain_coverage > 0.0);
        assert!(coverage.domain_coverage < 1.0);
    }

    #[test]
    fn test_performance_engineer_on_two_teams() {
        let selected = scored(&["performance-engineer", "business-analyst"]);
        let teams = Teams::form(&selected);
        // Engineer role lands on implementation, Performance on optimization
        assert!(teams.get(TeamKind::Implementation).contains(&"performance-engineer".to_string()));
        assert!(teams.get(TeamKind::Optimization).contains(&"performance-engineer".to_string()));
    }
}
