//! Prompt assembly
//!
//! Builds the system+user instruction pair for one agent from the document
//! profile, the workflow phase, and digested earlier responses. Also builds
//! the aggregated prompt used by batch-capable providers.

use super::template::PromptTemplates;
use crate::analysis::profile::DocumentProfile;
use crate::analysis::text;
use crate::catalog::profile::AgentProfile;
use crate::orchestration::phase::Phase;
use crate::orchestration::response::AgentResponse;
use serde::{Deserialize, Serialize};

/// How many earlier responses may be carried into a prompt
const MAX_CONTEXT_RESPONSES: usize = 3;

/// Sentences kept when digesting an earlier response
const DIGEST_SENTENCES: usize = 2;

/// Requested shape of the agent's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Detailed,
    Concise,
    Technical,
    Strategic,
}

impl OutputFormat {
    fn instruction(&self) -> &'static str {
        match self {
            OutputFormat::Detailed => {
                "Structure your answer with findings, recommendations, and concerns, \
                 each as its own section."
            }
            OutputFormat::Concise => {
                "Answer in at most five bullet points covering only your strongest findings."
            }
            OutputFormat::Technical => {
                "Keep the answer technical: concrete mechanisms, data structures, \
                 and failure modes over strategy."
            }
            OutputFormat::Strategic => {
                "Keep the answer strategic: business impact, sequencing, and \
                 resourcing over implementation detail."
            }
        }
    }
}

/// Options modifying a single prompt build
#[derive(Debug, Clone, Default)]
pub struct PromptOptions<'a> {
    /// Phase the agent is being queried in
    pub phase: Option<Phase>,
    /// Earlier responses that may be shared as context
    pub previous_responses: &'a [AgentResponse],
    /// Extra focus instruction, e.g. a pivot or differentiation note
    pub specific_focus: Option<&'a str>,
    /// Requested output shape
    pub output_format: OutputFormat,
}

/// A composed system+user instruction pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Build the instruction pair for one agent.
pub fn build_prompt(
    agent: &AgentProfile,
    profile: &DocumentProfile,
    task: &str,
    options: &PromptOptions<'_>,
) -> Prompt {
    let mut system = String::new();
    system.push_str(PromptTemplates::system_for(profile.doc_type));
    system.push_str("\n\nYou are ");
    system.push_str(&agent.name);
    system.push_str(" (");
    system.push_str(&agent.role);
    system.push_str("). Your capabilities: ");
    system.push_str(&agent.capabilities.join(", "));
    system.push_str(".\n\n");
    system.push_str(PromptTemplates::checklist_for(&agent.role));

    for detected in &profile.domains {
        system.push('\n');
        system.push_str(PromptTemplates::domain_focus(detected.domain));
    }

    let mut user = String::new();
    if let Some(phase) = options.phase {
        user.push_str(&format!("Workflow phase: {}.\n\n", phase.display_name()));
    }
    user.push_str("Task:\n");
    user.push_str(task);
    user.push('\n');

    if !profile.domains.is_empty() {
        user.push_str(&format!("\nDetected domains: {}.\n", profile.domain_names()));
        user.push_str("Guiding questions:\n");
        for detected in &profile.domains {
            for question in PromptTemplates::domain_questions(detected.domain) {
                user.push_str("- ");
                user.push_str(question);
                user.push('\n');
            }
        }
    }

    let context = relevant_context(agent, options.previous_responses);
    if !context.is_empty() {
        user.push_str("\nEarlier panel findings:\n");
        for (name, digest) in context {
            user.push_str(&format!("- {}: {}\n", name, digest));
        }
    }

    if let Some(focus) = options.specific_focus {
        user.push('\n');
        user.push_str(focus);
        user.push('\n');
    }

    user.push('\n');
    user.push_str(options.output_format.instruction());

    Prompt { system, user }
}

/// Earlier responses an agent is allowed to see: successful ones authored by
/// leadership or by the same expertise area, most recent first, capped and
/// digested to their opening sentences.
fn relevant_context(
    agent: &AgentProfile,
    previous: &[AgentResponse],
) -> Vec<(String, String)> {
    let area = agent.expertise_area();
    previous
        .iter()
        .rev()
        .filter(|response| response.is_success())
        .filter(|response| {
            let author =
                AgentProfile::new(&response.agent_id, &response.agent_name, &response.agent_role);
            author.is_leadership() || author.expertise_area() == area
        })
        .take(MAX_CONTEXT_RESPONSES)
        .map(|response| {
            let digest = text::first_sentences(&response.content, DIGEST_SENTENCES).join(". ");
            (response.agent_name.clone(), digest)
        })
        .collect()
}

/// Aggregated prompt for batch-capable providers: one request covering all
/// agents of a phase, answered in per-agent sections.
pub fn build_batch_prompt(
    agents: &[AgentProfile],
    profile: &DocumentProfile,
    task: &str,
    phase: Phase,
) -> Prompt {
    let system = format!(
        "{}\n\nYou will answer once for an entire expert panel. Produce one \
         clearly headed section per panelist, written in that panelist's \
         specialty, in the order listed.",
        PromptTemplates::system_for(profile.doc_type)
    );

    let mut user = format!("Workflow phase: {}.\n\nTask:\n{}\n\nPanel:\n", phase.display_name(), task);
    for agent in agents {
        user.push_str(&format!(
            "- {} ({}): {}\n",
            agent.name,
            agent.role,
            agent.capabilities.join(", ")
        ));
    }
    user.push_str("\nBegin each section with \"## <panelist name>\".");

    Prompt { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify;
    use crate::catalog::AgentCatalog;

    fn profile() -> DocumentProfile {
        classify(&format!(
            "# Ledger Whitepaper\n\n## Abstract\n\n{}",
            "A decentralized blockchain protocol where smart contract staking \
             secures validator consensus over the shared token ledger. "
                .repeat(6)
        ))
    }

    fn agent(id: &str) -> AgentProfile {
        AgentCatalog::builtin().get(id).expect(id).clone()
    }

    #[test]
    fn test_prompt_names_agent_and_task() {
        let prompt = build_prompt(
            &agent("security-architect"),
            &profile(),
            "Review the staking design",
            &PromptOptions::default(),
        );
        assert!(prompt.system.contains("Security Architect"));
        assert!(prompt.user.contains("Review the staking design"));
    }

    #[test]
    fn test_domain_focus_included() {
        let prompt = build_prompt(
            &agent("blockchain-specialist"),
            &profile(),
            "Review",
            &PromptOptions::default(),
        );
        assert!(prompt.system.contains("token economics"));
        assert!(prompt.user.contains("adversarial validator"));
    }

    #[test]
    fn test_phase_and_focus_rendered() {
        let options = PromptOptions {
            phase: Some(Phase::Validation),
            specific_focus: Some(PromptTemplates::differentiation_note()),
            ..Default::default()
        };
        let prompt = build_prompt(&agent("penetration-tester"), &profile(), "Review", &options);
        assert!(prompt.user.contains("Workflow phase: Validation"));
        assert!(prompt.user.contains("closely matched another panelist"));
    }

    #[test]
    fn test_context_limited_to_relevant_authors() {
        let mut previous = Vec::new();
        for i in 0..5 {
            previous.push(AgentResponse::success(
                format!("sec-{i}"),
                format!("Security Expert {i}"),
                "Security Analyst",
                Phase::Analysis,
                format!("Security finding number {i}. Supporting detail. Extra sentence."),
            ));
        }
        previous.push(AgentResponse::success(
            "fe",
            "Frontend Developer",
            "Frontend Developer",
            Phase::Analysis,
            "Unrelated frontend note.",
        ));

        let options = PromptOptions {
            previous_responses: &previous,
            ..Default::default()
        };
        let prompt = build_prompt(&agent("security-analyst"), &profile(), "Review", &options);

        // Most recent three security authors only; the frontend note is excluded
        assert!(prompt.user.contains("Security Expert 4"));
        assert!(prompt.user.contains("Security Expert 2"));
        assert!(!prompt.user.contains("Security Expert 1"));
        assert!(!prompt.user.contains("frontend note"));
        // Digest keeps only the opening sentences
        assert!(!prompt.user.contains("Extra sentence"));
    }

    #[test]
    fn test_leadership_context_always_shared() {
        let previous = vec![AgentResponse::success(
            "lead-architect",
            "Lead Architect",
            "Lead Architect",
            Phase::Analysis,
            "Overall direction is sound.",
        )];
        let options = PromptOptions {
            previous_responses: &previous,
            ..Default::default()
        };
        let prompt = build_prompt(&agent("frontend-developer"), &profile(), "Review", &options);
        assert!(prompt.user.contains("Lead Architect"));
    }

    #[test]
    fn test_failed_responses_excluded_from_context() {
        let previous = vec![AgentResponse::failure(
            "lead-architect",
            "Lead Architect",
            "Lead Architect",
            Phase::Analysis,
            "provider timeout",
        )];
        let options = PromptOptions {
            previous_responses: &previous,
            ..Default::default()
        };
        let prompt = build_prompt(&agent("frontend-developer"), &profile(), "Review", &options);
        assert!(!prompt.user.contains("Earlier panel findings"));
    }

    #[test]
    fn test_batch_prompt_lists_all_agents() {
        let agents = vec![agent("security-architect"), agent("backend-developer")];
        let prompt = build_batch_prompt(&agents, &profile(), "Review", Phase::Analysis);
        assert!(prompt.user.contains("Security Architect"));
        assert!(prompt.user.contains("Backend Developer"));
        assert!(prompt.system.contains("entire expert panel"));
    }

    #[test]
    fn test_output_format_variants() {
        for (format, marker) in [
            (OutputFormat::Concise, "five bullet points"),
            (OutputFormat::Technical, "failure modes"),
            (OutputFormat::Strategic, "business impact"),
        ] {
            let options = PromptOptions {
                output_format: format,
                ..Default::default()
            };
            let prompt = build_prompt(&agent("business-analyst"), &profile(), "Review", &options);
            assert!(prompt.user.contains(marker), "missing {marker}");
        }
    }
}
