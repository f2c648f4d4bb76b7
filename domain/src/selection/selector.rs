//! Ranked agent selection
//!
//! Selection runs in three steps: score and rank the whole catalog, force in
//! leadership when requested, then fill remaining slots either proportionally
//! across expertise areas or by plain rank.

use super::scorer::{score_agent, AgentScore};
use super::teams::{CoverageMetrics, Teams};
use crate::analysis::profile::DocumentProfile;
use crate::catalog::profile::{AgentProfile, ExpertiseArea};
use crate::catalog::AgentCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many leadership agents the guarantee forces in
const LEADERSHIP_SLOTS: usize = 2;

/// Criteria for a selection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionCriteria {
    /// Upper bound on selected agents
    pub max_agents: usize,
    /// Agents scoring below this are not considered (leadership excepted)
    pub min_score: f64,
    /// Force the top leadership agents in regardless of score
    pub require_leadership: bool,
    /// Spread slots across expertise areas instead of pure rank order
    pub balance_expertise: bool,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            max_agents: 15,
            min_score: 5.0,
            require_leadership: true,
            balance_expertise: true,
        }
    }
}

/// An agent together with its selection score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredAgent {
    pub agent: AgentProfile,
    pub score: AgentScore,
}

/// Outcome of a selection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Selected agents, strongest first
    pub selected: Vec<ScoredAgent>,
    /// Advisory role-based team buckets (not the execution assignment)
    pub teams: Teams,
    /// How well the selection covers the document's needs
    pub coverage: CoverageMetrics,
}

impl SelectionResult {
    pub fn agent_ids(&self) -> Vec<&str> {
        self.selected.iter().map(|s| s.agent.id.as_str()).collect()
    }

    pub fn agents(&self) -> Vec<AgentProfile> {
        self.selected.iter().map(|s| s.agent.clone()).collect()
    }
}

/// Score the catalog against a profile and pick the best team.
pub fn select_agents(
    catalog: &AgentCatalog,
    profile: &DocumentProfile,
    criteria: &SelectionCriteria,
) -> SelectionResult {
    let mut ranked: Vec<ScoredAgent> = catalog
        .iter()
        .map(|agent| ScoredAgent {
            agent: agent.clone(),
            score: score_agent(agent, profile),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total
            .partial_cmp(&a.score.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut selected: Vec<ScoredAgent> = Vec::new();

    if criteria.require_leadership {
        for leader in ranked
            .iter()
            .filter(|s| s.agent.is_leadership())
            .take(LEADERSHIP_SLOTS)
        {
            if selected.len() < criteria.max_agents {
                selected.push(leader.clone());
            }
        }
    }

    let eligible: Vec<&ScoredAgent> = ranked
        .iter()
        .filter(|s| s.score.total >= criteria.min_score)
        .filter(|s| !selected.iter().any(|picked| picked.agent.id == s.agent.id))
        .collect();

    if criteria.balance_expertise {
        fill_balanced(&mut selected, &eligible, criteria.max_agents);
    } else {
        for candidate in &eligible {
            if selected.len() >= criteria.max_agents {
                break;
            }
            selected.push((*candidate).clone());
        }
    }

    selected.sort_by(|a, b| {
        b.score
            .total
            .partial_cmp(&a.score.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let teams = Teams::form(&selected);
    let coverage = CoverageMetrics::compute(&selected, &teams, profile);

    SelectionResult {
        selected,
        teams,
        coverage,
    }
}

/// Distribute remaining slots proportionally across expertise areas, then
/// back-fill by global rank
fn fill_balanced(selected: &mut Vec<ScoredAgent>, eligible: &[&ScoredAgent], max_agents: usize) {
    let remaining = max_agents.saturating_sub(selected.len());
    if remaining == 0 {
        return;
    }

    let mut by_area: HashMap<ExpertiseArea, Vec<&ScoredAgent>> = HashMap::new();
    for candidate in eligible {
        by_area
            .entry(candidate.agent.expertise_area())
            .or_default()
            .push(candidate);
    }
    // Candidates within an area keep their global rank order
    let area_count = by_area.len().max(1);
    let per_area = remaining / area_count;

    if per_area > 0 {
        let mut areas: Vec<&ExpertiseArea> = by_area.keys().collect();
        areas.sort_by_key(|area| area.as_str());
        let areas: Vec<ExpertiseArea> = areas.into_iter().copied().collect();
        for area in areas {
            for candidate in by_area[&area].iter().take(per_area) {
                if selected.len() < max_agents {
                    selected.push((*candidate).clone());
                }
            }
        }
    }

    // Back-fill leftovers by rank
    for candidate in eligible {
        if selected.len() >= max_agents {
            break;
        }
        if !selected.iter().any(|picked| picked.agent.id == candidate.agent.id) {
            selected.push((*candidate).clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify;

    fn security_profile() -> DocumentProfile {
        classify(&format!(
            "# Security Architecture Review\n\n## Overview\n\n{}",
            "The authentication layer shows an encryption vulnerability under \
             audit. The threat model covers attack paths against oauth and tls \
             endpoints across the distributed microservices infrastructure \
             cluster with replication. "
                .repeat(6)
        ))
    }

    #[test]
    fn test_respects_max_agents() {
        let catalog = AgentCatalog::builtin();
        let profile = security_profile();
        for max in [1, 5, 12] {
            let criteria = SelectionCriteria {
                max_agents: max,
                ..Default::default()
            };
            let result = select_agents(&catalog, &profile, &criteria);
            assert!(result.selected.len() <= max, "{} > {}", result.selected.len(), max);
            assert!(!result.selected.is_empty());
        }
    }

    #[test]
    fn test_no_duplicate_selection() {
        let catalog = AgentCatalog::builtin();
        let result = select_agents(&catalog, &security_profile(), &SelectionCriteria::default());
        let mut ids = result.agent_ids();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_leadership_guarantee() {
        let catalog = AgentCatalog::builtin();
        let result = select_agents(&catalog, &security_profile(), &SelectionCriteria::default());
        assert!(
            result.selected.iter().any(|s| s.agent.is_leadership()),
            "no leadership agent in {:?}",
            result.agent_ids()
        );
    }

    #[test]
    fn test_leadership_can_be_disabled() {
        let catalog = AgentCatalog::builtin();
        let criteria = SelectionCriteria {
            require_leadership: false,
            min_score: 1000.0,
            ..Default::default()
        };
        let result = select_agents(&catalog, &security_profile(), &criteria);
        assert!(result.selected.is_empty());
    }

    #[test]
    fn test_selection_sorted_by_score() {
        let catalog = AgentCatalog::builtin();
        let result = select_agents(&catalog, &security_profile(), &SelectionCriteria::default());
        for pair in result.selected.windows(2) {
            assert!(pair[0].score.total >= pair[1].score.total);
        }
    }

    #[test]
    fn test_security_specialists_selected() {
        let catalog = AgentCatalog::builtin();
        let result = select_agents(&catalog, &security_profile(), &SelectionCriteria::default());
        let ids = result.agent_ids();
        assert!(
            ids.contains(&"security-architect") || ids.contains(&"security-analyst"),
            "no security specialist in {:?}",
            ids
        );
    }

    #[test]
    fn test_balancing_spreads_expertise() {
        let catalog = AgentCatalog::builtin();
        let criteria = SelectionCriteria {
            max_agents: 12,
            min_score: 0.5,
            ..Default::default()
        };
        let result = select_agents(&catalog, &security_profile(), &criteria);
        let areas: std::collections::HashSet<ExpertiseArea> = result
            .selected
            .iter()
            .map(|s| s.agent.expertise_area())
            .collect();
        assert!(areas.len() >= 3, "only {} areas covered", areas.len());
    }
}
