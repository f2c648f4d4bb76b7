//! Final workflow report envelope

use super::response::AgentResponse;
use super::session::WorkflowSession;
use crate::analysis::DocumentProfile;
use crate::selection::SelectionResult;
use crate::synthesis::ConsensusReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Run metadata carried alongside the analytical payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration_ms: i64,
    pub agents_consulted: Vec<String>,
}

/// Aggregate counters over the collected responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub total_responses: usize,
    pub failed_responses: usize,
    pub offline_responses: usize,
    pub duplicate_responses: usize,
}

impl ReportMetrics {
    pub fn from_responses(responses: &[AgentResponse]) -> Self {
        Self {
            total_responses: responses.len(),
            failed_responses: responses.iter().filter(|r| !r.is_success()).count(),
            offline_responses: responses.iter().filter(|r| r.offline).count(),
            duplicate_responses: responses.iter().filter(|r| r.duplicate).count(),
        }
    }
}

/// Everything a completed workflow produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub metadata: ReportMetadata,
    pub profile: DocumentProfile,
    pub selection: SelectionResult,
    pub responses: Vec<AgentResponse>,
    pub synthesis: ConsensusReport,
    pub metrics: ReportMetrics,
}

impl WorkflowReport {
    pub fn assemble(
        session: &WorkflowSession,
        profile: DocumentProfile,
        selection: SelectionResult,
        synthesis: ConsensusReport,
    ) -> Self {
        let responses = session.responses().to_vec();
        Self {
            metadata: ReportMetadata {
                session_id: session.id().to_string(),
                started_at: session.started_at(),
                finished_at: session.finished_at(),
                duration_ms: session.duration_ms(),
                agents_consulted: session.agents_consulted(),
            },
            metrics: ReportMetrics::from_responses(&responses),
            profile,
            selection,
            responses,
            synthesis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier;
    use crate::catalog::AgentCatalog;
    use crate::core::task::Task;
    use crate::orchestration::phase::Phase;
    use crate::selection::{select_agents, SelectionCriteria};
    use crate::synthesis::Synthesizer;

    #[test]
    fn test_assemble_counts_and_metadata() {
        let mut session = WorkflowSession::new(Task::new("Review the architecture document"));
        session.record_response(AgentResponse::success(
            "lead-architect",
            "Lead Architect",
            "Lead Architect",
            Phase::Analysis,
            "The architecture should scale.",
        ));
        session.record_response(AgentResponse::failure(
            "qa-engineer",
            "QA Engineer",
            "QA Engineer",
            Phase::Validation,
            "provider unreachable",
        ));

        let profile = classifier::classify("# Architecture\nA system design overview.");
        let selection = select_agents(
            AgentCatalog::global(),
            &profile,
            &SelectionCriteria::default(),
        );
        let synthesis = Synthesizer::new().synthesize(session.responses());
        let report = WorkflowReport::assemble(&session, profile, selection, synthesis);

        assert_eq!(report.metadata.session_id, session.id());
        assert_eq!(report.metadata.agents_consulted.len(), 2);
        assert_eq!(report.metrics.total_responses, 2);
        assert_eq!(report.metrics.failed_responses, 1);
        assert_eq!(report.synthesis.respondent_count, 1);
    }
}
