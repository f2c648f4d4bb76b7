//! Per-session deduplication registry
//!
//! The registry is the authority for which agents have been queried in a
//! session and which phase each agent works in. It also tracks response
//! token sets so near-identical answers from different agents get rejected.

use super::similarity::{self, OVERLAP_THRESHOLD};
use crate::catalog::profile::AgentProfile;
use crate::orchestration::phase::Phase;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Second-pass bucket bound: a phase stops borrowing multi-phase agents here
const SECOND_PASS_CAP: usize = 5;

/// Summary of a phase distribution run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionStats {
    /// Agents per phase, in phase order
    pub phase_counts: Vec<(Phase, usize)>,
    /// Agents appearing in more than one phase bucket
    pub multi_phase_agents: usize,
    /// Agents that fit no requested phase
    pub unassigned: usize,
}

/// Session-scoped registry of agent use, phase assignments and responses
#[derive(Debug, Default)]
pub struct SessionRegistry {
    used: HashSet<String>,
    assignments: HashMap<Phase, Vec<String>>,
    response_tokens: HashMap<String, HashSet<String>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the agent has already been queried this session
    pub fn is_agent_used(&self, agent_id: &str) -> bool {
        self.used.contains(agent_id)
    }

    /// Record that an agent has been queried; false if it already was
    pub fn mark_agent_used(&mut self, agent_id: &str) -> bool {
        self.used.insert(agent_id.to_string())
    }

    /// Drop agents that were already queried this session
    pub fn filter_unused<'a>(&self, agents: &'a [AgentProfile]) -> Vec<&'a AgentProfile> {
        agents
            .iter()
            .filter(|agent| !self.is_agent_used(&agent.id))
            .collect()
    }

    /// Agents assigned to a phase, in assignment order
    pub fn phase_agents(&self, phase: Phase) -> &[String] {
        self.assignments
            .get(&phase)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distribute agents across phases, scarcity-first.
    ///
    /// Agents with fewer eligible phases are placed first, each into its
    /// currently least-populated eligible phase. A bounded second pass then
    /// lets multi-phase-eligible agents join additional phases, so an agent
    /// may appear in more than one bucket.
    pub fn distribute_across_phases(
        &mut self,
        agents: &[AgentProfile],
        phases: &[Phase],
    ) -> DistributionStats {
        self.assignments.clear();
        for phase in phases {
            self.assignments.insert(*phase, Vec::new());
        }

        let mut eligibility: Vec<(&AgentProfile, Vec<Phase>)> = agents
            .iter()
            .map(|agent| {
                let eligible: Vec<Phase> = phases
                    .iter()
                    .copied()
                    .filter(|phase| agent.can_participate(*phase))
                    .collect();
                (agent, eligible)
            })
            .collect();

        // Scarce agents first; ties keep the caller's ranking order
        eligibility.sort_by_key(|(_, eligible)| eligible.len());

        let mut unassigned = 0usize;
        for (agent, eligible) in &eligibility {
            let target = eligible
                .iter()
                .min_by_key(|phase| self.assignments[phase].len());
            match target {
                Some(phase) => self
                    .assignments
                    .entry(*phase)
                    .or_default()
                    .push(agent.id.clone()),
                None => unassigned += 1,
            }
        }

        // Second pass: multi-phase agents may reinforce their other phases
        for (agent, eligible) in &eligibility {
            if eligible.len() < 2 {
                continue;
            }
            for phase in eligible {
                let bucket = self.assignments.entry(*phase).or_default();
                if bucket.len() < SECOND_PASS_CAP && !bucket.contains(&agent.id) {
                    bucket.push(agent.id.clone());
                }
            }
        }

        self.stats(phases, unassigned)
    }

    fn stats(&self, phases: &[Phase], unassigned: usize) -> DistributionStats {
        let phase_counts = phases
            .iter()
            .map(|phase| (*phase, self.phase_agents(*phase).len()))
            .collect();

        let mut appearances: HashMap<&str, usize> = HashMap::new();
        for bucket in self.assignments.values() {
            for id in bucket {
                *appearances.entry(id.as_str()).or_default() += 1;
            }
        }
        let multi_phase_agents = appearances.values().filter(|count| **count > 1).count();

        DistributionStats {
            phase_counts,
            multi_phase_agents,
            unassigned,
        }
    }

    /// Record a response unless it is a near-duplicate of another agent's.
    ///
    /// Returns false (and records nothing) when the text overlaps more than
    /// the threshold with a previously tracked response from a different
    /// agent. Re-tracking the same agent replaces its tokens.
    pub fn track_response(&mut self, agent_id: &str, text: &str) -> bool {
        let tokens = similarity::tokenize(text);

        for (other, other_tokens) in &self.response_tokens {
            if other != agent_id && similarity::jaccard(&tokens, other_tokens) > OVERLAP_THRESHOLD {
                return false;
            }
        }

        self.response_tokens.insert(agent_id.to_string(), tokens);
        true
    }

    /// Number of tracked responses
    pub fn tracked_responses(&self) -> usize {
        self.response_tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AgentCatalog;

    fn agents(ids: &[&str]) -> Vec<AgentProfile> {
        let catalog = AgentCatalog::builtin();
        ids.iter().map(|id| catalog.get(id).expect(id).clone()).collect()
    }

    #[test]
    fn test_agent_use_tracking() {
        let mut registry = SessionRegistry::new();
        assert!(!registry.is_agent_used("lead-architect"));
        assert!(registry.mark_agent_used("lead-architect"));
        assert!(registry.is_agent_used("lead-architect"));
        assert!(!registry.mark_agent_used("lead-architect"));
    }

    #[test]
    fn test_filter_unused() {
        let mut registry = SessionRegistry::new();
        registry.mark_agent_used("backend-developer");
        let pool = agents(&["backend-developer", "frontend-developer"]);
        let unused = registry.filter_unused(&pool);
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].id, "frontend-developer");
    }

    #[test]
    fn test_distribution_respects_eligibility() {
        let mut registry = SessionRegistry::new();
        let pool = agents(&[
            "lead-architect",
            "backend-developer",
            "penetration-tester",
            "business-analyst",
            "ux-designer",
        ]);
        registry.distribute_across_phases(&pool, &Phase::all());

        for phase in Phase::all() {
            for id in registry.phase_agents(phase) {
                let agent = pool.iter().find(|a| &a.id == id).unwrap();
                assert!(agent.can_participate(phase), "{id} not eligible for {phase}");
            }
        }
    }

    #[test]
    fn test_scarce_agents_assigned_first() {
        let mut registry = SessionRegistry::new();
        // penetration-tester is validation-only; it must land there even
        // though multi-phase agents could have crowded the bucket
        let pool = agents(&[
            "lead-architect",
            "security-architect",
            "penetration-tester",
        ]);
        registry.distribute_across_phases(&pool, &Phase::all());
        assert!(
            registry
                .phase_agents(Phase::Validation)
                .contains(&"penetration-tester".to_string())
        );
    }

    #[test]
    fn test_second_pass_allows_multi_phase_membership() {
        let mut registry = SessionRegistry::new();
        let pool = agents(&["lead-architect"]);
        let stats = registry.distribute_across_phases(&pool, &Phase::all());
        // Eligible for analysis and design; the second pass puts it in both
        assert!(registry.phase_agents(Phase::Analysis).contains(&"lead-architect".to_string()));
        assert!(registry.phase_agents(Phase::Design).contains(&"lead-architect".to_string()));
        assert_eq!(stats.multi_phase_agents, 1);
    }

    #[test]
    fn test_second_pass_cap_respected() {
        let mut registry = SessionRegistry::new();
        let pool = agents(&[
            "lead-architect",
            "system-architect",
            "solution-architect",
            "enterprise-architect",
            "technical-architect",
            "cloud-architect",
            "frontend-architect",
            "backend-architect",
        ]);
        registry.distribute_across_phases(&pool, &Phase::all());
        for phase in Phase::all() {
            assert!(
                registry.phase_agents(phase).len() <= SECOND_PASS_CAP.max(pool.len()),
                "bucket overflow in {phase}"
            );
        }
        // All eight are analysis+design eligible; neither bucket may exceed
        // the greedy share plus the second-pass cap
        assert!(registry.phase_agents(Phase::Analysis).len() <= SECOND_PASS_CAP);
    }

    #[test]
    fn test_unassignable_agent_counted() {
        let mut registry = SessionRegistry::new();
        let pool = agents(&["business-analyst"]);
        // business-analyst is analysis-eligible but not validation-eligible
        let stats = registry.distribute_across_phases(&pool, &[Phase::Validation]);
        assert_eq!(stats.unassigned, 1);
        assert!(registry.phase_agents(Phase::Validation).is_empty());
    }

    #[test]
    fn test_track_response_rejects_near_duplicate() {
        let mut registry = SessionRegistry::new();
        let original = "Adopt circuit breakers around provider calls because cascading \
                        failures otherwise exhaust every worker in the request pool";
        let near_copy = "Adopt circuit breakers around provider calls because cascading \
                         failures otherwise exhaust every worker in the thread pool";
        assert!(registry.track_response("agent-a", original));
        assert!(!registry.track_response("agent-b", near_copy));
        assert_eq!(registry.tracked_responses(), 1);
    }

    #[test]
    fn test_track_response_accepts_distinct_content() {
        let mut registry = SessionRegistry::new();
        assert!(registry.track_response(
            "agent-a",
            "Focus testing effort on the settlement reconciliation paths"
        ));
        assert!(registry.track_response(
            "agent-b",
            "Frontend bundle size dominates the first paint metrics"
        ));
        assert_eq!(registry.tracked_responses(), 2);
    }

    #[test]
    fn test_same_agent_may_update_its_response() {
        let mut registry = SessionRegistry::new();
        let text = "Document the rollback procedure before the first deployment window";
        assert!(registry.track_response("agent-a", text));
        assert!(registry.track_response("agent-a", text));
    }
}
