//! Run workflow use case
//!
//! Orchestrates the full document-review flow: classify the document,
//! select the expert panel, run the phased review and synthesize the
//! consensus report.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider_gateway::{ProviderGateway, QueryRequest, QueryResponse};
use crate::ports::transcript::{NoTranscript, TranscriptEvent, TranscriptLogger};
use roundtable_domain::analysis::{classify, ComplexityBand, DocumentProfile};
use roundtable_domain::catalog::{AgentCatalog, AgentProfile};
use roundtable_domain::core::error::DomainError;
use roundtable_domain::core::task::Task;
use roundtable_domain::orchestration::config::HIGH_COMPLEXITY_MIN_SCORE;
use roundtable_domain::prompt::{build_batch_prompt, build_prompt, PromptOptions, PromptTemplates};
use roundtable_domain::selection::{select_agents, SelectionCriteria, SelectionResult};
use roundtable_domain::synthesis::{KeywordExtractor, ResponseExtractor, Synthesizer};
use roundtable_domain::{
    AgentResponse, Phase, SessionRegistry, WorkflowConfig, WorkflowReport, WorkflowSession,
    WorkflowState,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur before the phased review starts.
///
/// Once phases are running, provider trouble degrades to offline responses
/// and never surfaces here.
#[derive(Error, Debug)]
pub enum RunWorkflowError {
    #[error("No agents matched the document profile")]
    NoAgents,

    #[error("Workflow cancelled")]
    Cancelled,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the RunWorkflow use case
#[derive(Debug, Clone)]
pub struct RunWorkflowInput {
    /// The document or question under review
    pub task: Task,
    /// Workflow tuning
    pub config: WorkflowConfig,
}

impl RunWorkflowInput {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            config: WorkflowConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }
}

/// Use case for running a full roundtable review
pub struct RunWorkflowUseCase<G: ProviderGateway + 'static> {
    gateway: Arc<G>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl<G: ProviderGateway + 'static> RunWorkflowUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            transcript: Arc::new(NoTranscript),
        }
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunWorkflowInput) -> Result<WorkflowReport, RunWorkflowError> {
        self.execute_with_progress(input, &NoProgress, CancellationToken::new())
            .await
    }

    /// Execute the use case with progress callbacks and cancellation
    pub async fn execute_with_progress(
        &self,
        input: RunWorkflowInput,
        progress: &dyn ProgressNotifier,
        cancel: CancellationToken,
    ) -> Result<WorkflowReport, RunWorkflowError> {
        input.config.validate()?;

        let mut session = WorkflowSession::new(input.task.clone());
        info!(session = session.id(), "Starting roundtable workflow");

        let profile = match self.analyze(&mut session, progress) {
            Ok(profile) => profile,
            Err(e) => {
                session.fail();
                return Err(e);
            }
        };

        let selection = match self.select(&mut session, &profile, &input.config, progress) {
            Ok(selection) => selection,
            Err(e) => {
                session.fail();
                return Err(e);
            }
        };

        let mut registry = SessionRegistry::new();
        let agents = selection.agents();
        let stats = registry.distribute_across_phases(&agents, &Phase::all());
        debug!(?stats, "Distributed agents across phases");

        for phase in Phase::all() {
            if cancel.is_cancelled() {
                session.fail();
                return Err(RunWorkflowError::Cancelled);
            }
            self.transition(&mut session, WorkflowState::Phase(phase), progress)?;
            self.run_phase(&mut session, &mut registry, &agents, &profile, &input.config, phase, progress)
                .await;
            if phase == Phase::Analysis {
                self.check_pivot(&session, progress);
            }
        }

        self.transition(&mut session, WorkflowState::Synthesis, progress)?;
        let synthesis = Synthesizer::new().synthesize(session.responses());
        self.transcript.log(TranscriptEvent::new(
            "synthesis",
            json!({
                "session_id": session.id(),
                "respondents": synthesis.respondent_count,
                "agreement": synthesis.consensus.overall_agreement,
            }),
        ));

        self.transition(&mut session, WorkflowState::Done, progress)?;
        info!(
            session = session.id(),
            responses = session.responses().len(),
            "Workflow complete"
        );
        Ok(WorkflowReport::assemble(&session, profile, selection, synthesis))
    }

    fn analyze(
        &self,
        session: &mut WorkflowSession,
        progress: &dyn ProgressNotifier,
    ) -> Result<DocumentProfile, RunWorkflowError> {
        self.transition(session, WorkflowState::DocumentAnalysis, progress)?;
        let profile = classify(session.task().content());
        info!(
            doc_type = profile.doc_type.as_str(),
            domains = %profile.domain_names(),
            complexity = ?profile.complexity.band,
            "Document analyzed"
        );
        Ok(profile)
    }

    fn select(
        &self,
        session: &mut WorkflowSession,
        profile: &DocumentProfile,
        config: &WorkflowConfig,
        progress: &dyn ProgressNotifier,
    ) -> Result<SelectionResult, RunWorkflowError> {
        self.transition(session, WorkflowState::AgentSelection, progress)?;

        // Complex documents warrant a stricter bar
        let min_score = if profile.complexity.band == ComplexityBand::High {
            config.min_score.max(HIGH_COMPLEXITY_MIN_SCORE)
        } else {
            config.min_score
        };
        let criteria = SelectionCriteria {
            max_agents: config.max_agents,
            min_score,
            require_leadership: config.require_leadership,
            balance_expertise: config.balance_expertise,
        };

        let selection = select_agents(AgentCatalog::global(), profile, &criteria);
        if selection.selected.is_empty() {
            return Err(RunWorkflowError::NoAgents);
        }
        info!(
            agents = selection.selected.len(),
            coverage = selection.coverage.overall,
            "Expert panel selected"
        );
        Ok(selection)
    }

    /// Run one phase bucket. Never fails: provider trouble yields offline
    /// responses and task-level trouble degrades the phase.
    #[allow(clippy::too_many_arguments)]
    async fn run_phase(
        &self,
        session: &mut WorkflowSession,
        registry: &mut SessionRegistry,
        agents: &[AgentProfile],
        profile: &DocumentProfile,
        config: &WorkflowConfig,
        phase: Phase,
        progress: &dyn ProgressNotifier,
    ) {
        let by_id: HashMap<&str, &AgentProfile> =
            agents.iter().map(|agent| (agent.id.as_str(), agent)).collect();
        let assigned: Vec<AgentProfile> = registry
            .phase_agents(phase)
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).map(|agent| (*agent).clone()))
            .collect();
        // The distribution may place a multi-phase agent in several buckets;
        // each agent still answers at most once per session.
        let bucket: Vec<&AgentProfile> = registry.filter_unused(&assigned);
        for agent in &bucket {
            registry.mark_agent_used(&agent.id);
        }

        progress.on_phase_start(phase, bucket.len());
        if bucket.is_empty() {
            debug!(phase = phase.as_str(), "Empty phase bucket");
            progress.on_phase_complete(phase);
            return;
        }

        let context = session.responses().to_vec();
        let requests: Vec<QueryRequest> = bucket
            .iter()
            .map(|agent| {
                let options = PromptOptions {
                    phase: Some(phase),
                    previous_responses: &context,
                    ..PromptOptions::default()
                };
                QueryRequest {
                    agent_id: agent.id.clone(),
                    agent_name: agent.name.clone(),
                    agent_role: agent.role.clone(),
                    phase,
                    prompt: build_prompt(agent, profile, session.task().content(), &options),
                }
            })
            .collect();

        let answered = if config.batch && requests.len() > 1 {
            let panel: Vec<AgentProfile> = bucket.iter().map(|agent| (*agent).clone()).collect();
            let batch_prompt =
                build_batch_prompt(&panel, profile, session.task().content(), phase);
            let responses = self.gateway.query_batch(batch_prompt, requests.clone()).await;
            requests.into_iter().zip(responses).collect()
        } else {
            self.query_concurrently(requests, config.stagger_ms).await
        };

        for (request, answer) in answered {
            let response = self
                .deduplicate(registry, &by_id, profile, session.task().content(), request, answer)
                .await;
            progress.on_agent_response(&response);
            self.transcript.log(TranscriptEvent::new(
                "agent_response",
                json!({
                    "session_id": session.id(),
                    "agent_id": response.agent_id,
                    "phase": response.phase.as_str(),
                    "provider": response.provider,
                    "success": response.success,
                    "offline": response.offline,
                    "duplicate": response.duplicate,
                }),
            ));
            session.record_response(response);
        }
        progress.on_phase_complete(phase);
    }

    /// Query every request on its own task with a fixed inter-agent stagger
    /// so one provider is not hit by the whole panel at once.
    async fn query_concurrently(
        &self,
        requests: Vec<QueryRequest>,
        stagger_ms: u64,
    ) -> Vec<(QueryRequest, QueryResponse)> {
        let mut join_set = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            join_set.spawn(async move {
                tokio::time::sleep(Duration::from_millis(stagger_ms * index as u64)).await;
                let answer = gateway.query_agent(request.clone()).await;
                (request, answer)
            });
        }

        let mut answered = Vec::new();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok(pair) => answered.push(pair),
                // A panicked task degrades the phase by one response
                Err(e) => warn!("Agent task failed: {e}"),
            }
        }
        answered
    }

    /// Turn a gateway answer into a recorded response, regenerating once
    /// when it is a near-duplicate of another agent's.
    async fn deduplicate(
        &self,
        registry: &mut SessionRegistry,
        by_id: &HashMap<&str, &AgentProfile>,
        profile: &DocumentProfile,
        task: &str,
        request: QueryRequest,
        answer: QueryResponse,
    ) -> AgentResponse {
        let mut content = answer.content;
        let mut provider = answer.provider;
        let mut offline = answer.offline;
        let mut duplicate = false;

        if !registry.track_response(&request.agent_id, &content) {
            debug!(agent = %request.agent_id, "Near-duplicate response, regenerating");
            if let Some(agent) = by_id.get(request.agent_id.as_str()) {
                let options = PromptOptions {
                    phase: Some(request.phase),
                    specific_focus: Some(PromptTemplates::differentiation_note()),
                    ..PromptOptions::default()
                };
                let retry = QueryRequest {
                    prompt: build_prompt(agent, profile, task, &options),
                    ..request.clone()
                };
                let regenerated = self.gateway.query_agent(retry).await;
                content = regenerated.content;
                provider = regenerated.provider;
                offline = regenerated.offline;
            }
            if !registry.track_response(&request.agent_id, &content) {
                warn!(agent = %request.agent_id, "Response still duplicated after retry");
                duplicate = true;
            }
        }

        AgentResponse::success(
            request.agent_id,
            request.agent_name,
            request.agent_role,
            request.phase,
            content,
        )
        .with_provider(provider)
        .with_shared(answer.shared)
        .with_offline(offline)
        .with_duplicate(duplicate)
    }

    /// Emit a strategy adjustment when most of the analysis round raised
    /// concern or risk language. Non-blocking: the workflow continues.
    fn check_pivot(&self, session: &WorkflowSession, progress: &dyn ProgressNotifier) {
        let analysis: Vec<&AgentResponse> = session
            .responses()
            .iter()
            .filter(|r| r.phase == Phase::Analysis && r.is_success())
            .collect();
        if analysis.is_empty() {
            return;
        }
        let concerned = analysis
            .iter()
            .filter(|r| !KeywordExtractor.extract(&r.content).concerns.is_empty())
            .count();
        if concerned * 2 > analysis.len() {
            let message = format!(
                "{concerned} of {} analysis responses raised concerns; \
                 subsequent phases should weigh risk mitigation heavily",
                analysis.len()
            );
            warn!(session = session.id(), "{message}");
            progress.on_strategy_pivot(&message);
            self.transcript.log(TranscriptEvent::new(
                "strategy_pivot",
                json!({ "session_id": session.id(), "message": message }),
            ));
        }
    }

    fn transition(
        &self,
        session: &mut WorkflowSession,
        state: WorkflowState,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), RunWorkflowError> {
        session.transition(state)?;
        progress.on_state_change(state);
        self.transcript.log(TranscriptEvent::new(
            "state_change",
            json!({ "session_id": session.id(), "state": state.as_str() }),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Gateway canning one distinct answer per call
    struct CannedGateway {
        answers: Mutex<Vec<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl CannedGateway {
        fn distinct() -> Self {
            Self {
                answers: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_answers(answers: Vec<String>) -> Self {
            Self {
                answers: Mutex::new(answers),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProviderGateway for CannedGateway {
        async fn query_agent(&self, request: QueryRequest) -> QueryResponse {
            let call_number = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(request.agent_id.clone());
                calls.len()
            };
            let canned = self.answers.lock().unwrap().pop();
            // Fallback answers carry call-unique tokens so the overlap
            // tracker never sees them as near-duplicates.
            let content = canned.unwrap_or_else(|| {
                format!(
                    "Finding{call_number} with angle{call_number}: {} speaks to aspect{call_number}.",
                    request.agent_name
                )
            });
            QueryResponse {
                content,
                provider: "stub".to_string(),
                offline: true,
                shared: false,
            }
        }
    }

    fn whitepaper_task() -> Task {
        Task::new(format!(
            "# Ledger Whitepaper\n\n## Abstract\n\n{}",
            "A decentralized blockchain protocol where smart contract staking \
             secures validator consensus over the shared token ledger. "
                .repeat(8)
        ))
    }

    #[tokio::test]
    async fn test_full_workflow_produces_report() {
        let gateway = Arc::new(CannedGateway::distinct());
        let use_case = RunWorkflowUseCase::new(gateway);
        let input = RunWorkflowInput::new(whitepaper_task())
            .with_config(WorkflowConfig::default().with_stagger(0));

        let report = use_case.execute(input).await.unwrap();
        assert!(!report.responses.is_empty());
        assert!(report.metrics.total_responses > 0);
        assert_eq!(report.metrics.failed_responses, 0);
        assert!(!report.metadata.agents_consulted.is_empty());
        assert_eq!(report.synthesis.respondent_count, report.responses.len());
    }

    #[tokio::test]
    async fn test_each_agent_answers_at_most_once() {
        // Multi-phase-eligible agents land in several phase buckets during
        // distribution; only their first bucket may actually query them.
        let gateway = Arc::new(CannedGateway::distinct());
        let use_case = RunWorkflowUseCase::new(gateway);
        let input = RunWorkflowInput::new(whitepaper_task())
            .with_config(WorkflowConfig::default().with_stagger(0));

        let report = use_case.execute(input).await.unwrap();
        let unique: std::collections::HashSet<&str> = report
            .responses
            .iter()
            .map(|r| r.agent_id.as_str())
            .collect();
        assert_eq!(unique.len(), report.responses.len());
    }

    #[tokio::test]
    async fn test_cancelled_before_phases() {
        let gateway = Arc::new(CannedGateway::distinct());
        let use_case = RunWorkflowUseCase::new(gateway);
        let input = RunWorkflowInput::new(whitepaper_task())
            .with_config(WorkflowConfig::default().with_stagger(0));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = use_case
            .execute_with_progress(input, &NoProgress, cancel)
            .await;
        assert!(matches!(result, Err(RunWorkflowError::Cancelled)));
    }

    #[tokio::test]
    async fn test_duplicate_answers_get_flagged_after_retry() {
        // Every call returns the same long answer, so every agent after the
        // first is a near-duplicate and stays one after its retry.
        let same = "The ledger consensus protocol requires careful validator \
                    incentive design before the staking launch window opens."
            .to_string();
        let gateway = Arc::new(CannedGateway::with_answers(vec![same; 200]));
        let use_case = RunWorkflowUseCase::new(gateway);
        let input = RunWorkflowInput::new(whitepaper_task())
            .with_config(WorkflowConfig::default().with_stagger(0));

        let report = use_case.execute(input).await.unwrap();
        if report.responses.len() > 1 {
            assert!(report.metrics.duplicate_responses >= report.responses.len() - 1);
        }
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let gateway = Arc::new(CannedGateway::distinct());
        let use_case = RunWorkflowUseCase::new(gateway);
        let input = RunWorkflowInput::new(whitepaper_task())
            .with_config(WorkflowConfig::default().with_max_agents(0));

        assert!(use_case.execute(input).await.is_err());
    }
}
