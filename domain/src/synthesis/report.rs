//! Final report assembly
//!
//! The [`Synthesizer`] runs the extraction seam over every successful
//! response and folds the results into a single [`ConsensusReport`].

use super::consensus::ConsensusAnalysis;
use super::divergence::{self, Divergence};
use super::extraction::{Extraction, KeywordExtractor, Priority, Recommendation, ResponseExtractor};
use super::opportunity::{self, Opportunity};
use super::risk::RiskRegister;
use super::roadmap::Roadmap;
use crate::catalog::AgentCatalog;
use crate::orchestration::AgentResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const ACTION_BUCKET_CAP: usize = 5;

/// Aggregate quality signals for the synthesized report, all in [0,1]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceMetrics {
    /// Mean per-response extraction confidence
    pub overall_confidence: f64,
    /// 1 − uniqueThemes / totalThemeMentions
    pub consensus_strength: f64,
    /// Unique expertise areas over response count
    pub expertise_alignment: f64,
    /// Mean recommendations per response, saturating at 5
    pub analysis_depth: f64,
}

impl ConfidenceMetrics {
    fn zero() -> Self {
        Self {
            overall_confidence: 0.0,
            consensus_strength: 0.0,
            expertise_alignment: 0.0,
            analysis_depth: 0.0,
        }
    }
}

/// Consolidated recommendations bucketed by urgency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionPlan {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

impl ActionPlan {
    fn build(recommendations: &[Recommendation]) -> Self {
        let mut plan = ActionPlan::default();
        for recommendation in recommendations {
            let bucket = match recommendation.priority {
                Priority::High => &mut plan.immediate,
                Priority::Medium => &mut plan.short_term,
                Priority::Low => &mut plan.long_term,
            };
            if bucket.len() < ACTION_BUCKET_CAP && !bucket.contains(&recommendation.text) {
                bucket.push(recommendation.text.clone());
            }
        }
        plan
    }
}

/// Everything the panel concluded, in one structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusReport {
    pub respondent_count: usize,
    pub consensus: ConsensusAnalysis,
    pub divergences: Vec<Divergence>,
    pub risks: RiskRegister,
    pub opportunities: Vec<Opportunity>,
    pub roadmap: Roadmap,
    pub action_plan: ActionPlan,
    pub confidence: ConfidenceMetrics,
    pub executive_summary: String,
}

/// Folds agent responses into a [`ConsensusReport`]
pub struct Synthesizer {
    extractor: Box<dyn ResponseExtractor>,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer {
    pub fn new() -> Self {
        Self { extractor: Box::new(KeywordExtractor) }
    }

    pub fn with_extractor(extractor: Box<dyn ResponseExtractor>) -> Self {
        Self { extractor }
    }

    /// Synthesize a report from the collected responses.
    ///
    /// Failed responses are skipped. With zero usable responses every metric
    /// degrades to 0 and every list is empty rather than dividing by zero.
    pub fn synthesize(&self, responses: &[AgentResponse]) -> ConsensusReport {
        let usable: Vec<&AgentResponse> = responses.iter().filter(|r| r.is_success()).collect();
        let extractions: Vec<(String, Extraction)> = usable
            .iter()
            .map(|response| (response.agent_name.clone(), self.extractor.extract(&response.content)))
            .collect();

        let consensus = ConsensusAnalysis::analyze(&extractions);
        let divergences = divergence::find_divergences(&extractions);
        let risks = RiskRegister::build(&extractions);
        let raw: Vec<(String, String)> = usable
            .iter()
            .map(|response| (response.agent_name.clone(), response.content.clone()))
            .collect();
        let opportunities = opportunity::find_opportunities(&raw);

        let all_recommendations: Vec<Recommendation> = extractions
            .iter()
            .flat_map(|(_, extraction)| extraction.recommendations.iter().cloned())
            .collect();
        let roadmap = Roadmap::build(&all_recommendations);
        let action_plan = ActionPlan::build(&all_recommendations);

        let confidence = confidence_metrics(&usable, &extractions);
        let executive_summary = executive_summary(
            usable.len(),
            consensus.overall_agreement,
            action_plan.immediate.len(),
            risks.overall_exposure,
            roadmap.estimated_total_weeks,
        );

        ConsensusReport {
            respondent_count: usable.len(),
            consensus,
            divergences,
            risks,
            opportunities,
            roadmap,
            action_plan,
            confidence,
            executive_summary,
        }
    }
}

fn confidence_metrics(
    responses: &[&AgentResponse],
    extractions: &[(String, Extraction)],
) -> ConfidenceMetrics {
    if extractions.is_empty() {
        return ConfidenceMetrics::zero();
    }
    let count = extractions.len() as f64;

    let overall_confidence =
        extractions.iter().map(|(_, e)| e.confidence).sum::<f64>() / count;

    let total_mentions: usize = extractions.iter().map(|(_, e)| e.themes.len()).sum();
    let unique_themes: HashSet<_> =
        extractions.iter().flat_map(|(_, e)| e.themes.iter()).collect();
    let consensus_strength = if total_mentions == 0 {
        0.0
    } else {
        1.0 - unique_themes.len() as f64 / total_mentions as f64
    };

    let catalog = AgentCatalog::global();
    let areas: HashSet<_> = responses
        .iter()
        .filter_map(|response| catalog.get(&response.agent_id))
        .map(|agent| agent.expertise_area())
        .collect();
    let expertise_alignment = areas.len() as f64 / count;

    let mean_recommendations =
        extractions.iter().map(|(_, e)| e.recommendations.len()).sum::<usize>() as f64 / count;
    let analysis_depth = (mean_recommendations / 5.0).min(1.0);

    ConfidenceMetrics {
        overall_confidence,
        consensus_strength,
        expertise_alignment,
        analysis_depth,
    }
}

fn executive_summary(
    respondents: usize,
    agreement: f64,
    immediate_actions: usize,
    risk_exposure: f64,
    roadmap_weeks: u32,
) -> String {
    format!(
        "{respondents} experts reviewed the document with {agreement:.0}% thematic agreement. \
         {immediate_actions} immediate action(s) were identified, overall risk exposure is \
         {risk:.0}%, and the proposed roadmap spans roughly {roadmap_weeks} weeks.",
        agreement = agreement * 100.0,
        risk = risk_exposure * 100.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::Phase;

    fn response(id: &str, name: &str, content: &str) -> AgentResponse {
        AgentResponse::success(id, name, name, Phase::Analysis, content)
    }

    #[test]
    fn test_zero_responses_degrade_to_defaults() {
        let report = Synthesizer::new().synthesize(&[]);
        assert_eq!(report.respondent_count, 0);
        assert_eq!(report.confidence.overall_confidence, 0.0);
        assert_eq!(report.confidence.consensus_strength, 0.0);
        assert!(report.risks.critical_risks().is_empty());
        assert!(report.divergences.is_empty());
        assert!(report.action_plan.immediate.is_empty());
        assert!(report.confidence.overall_confidence.is_finite());
    }

    #[test]
    fn test_failed_responses_are_skipped() {
        let failed = AgentResponse::failure(
            "lead-architect",
            "Lead Architect",
            "Lead Architect",
            Phase::Analysis,
            "provider unreachable",
        );
        let report = Synthesizer::new().synthesize(&[failed]);
        assert_eq!(report.respondent_count, 0);
    }

    #[test]
    fn test_full_report_assembly() {
        let responses = vec![
            response(
                "lead-architect",
                "Lead Architect",
                "The architecture is sound. You must implement a critical retry path; \
                 the security risk of a likely breach is clearly a major concern.",
            ),
            response(
                "security-architect",
                "Security Architect",
                "Security is the main theme. I recommend an audit. \
                 There is an opportunity to simplify the design.",
            ),
        ];
        let report = Synthesizer::new().synthesize(&responses);
        assert_eq!(report.respondent_count, 2);
        assert!(!report.consensus.themes.is_empty());
        assert!(!report.risks.risks.is_empty());
        assert!(!report.opportunities.is_empty());
        assert_eq!(report.roadmap.phases.len(), 5);
        assert!(!report.action_plan.immediate.is_empty());
        assert!(report.confidence.overall_confidence > 0.0);
        assert!(report.executive_summary.contains("2 experts"));
    }

    #[test]
    fn test_action_plan_caps_each_bucket() {
        let recommendations: Vec<Recommendation> = (0..8)
            .map(|i| Recommendation {
                text: format!("You must fix item {i}"),
                priority: Priority::High,
                category: crate::synthesis::extraction::RecommendationCategory::General,
            })
            .collect();
        let plan = ActionPlan::build(&recommendations);
        assert_eq!(plan.immediate.len(), 5);
        assert!(plan.short_term.is_empty());
    }

    #[test]
    fn test_expertise_alignment_counts_unique_areas() {
        let responses = vec![
            response("lead-architect", "Lead Architect", "I am certain this design is proven."),
            response("system-architect", "System Architect", "The design is clearly fine."),
        ];
        let report = Synthesizer::new().synthesize(&responses);
        // Both respondents share the architecture area: 1 area over 2 responses
        assert!((report.confidence.expertise_alignment - 0.5).abs() < 1e-9);
    }
}
