//! Markdown output formatter

use crate::output::formatter::OutputFormatter;
use roundtable_domain::WorkflowReport;

/// Renders the workflow report as a Markdown document
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn format(report: &WorkflowReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Roundtable Review: {}\n\n", report.profile.title));
        output.push_str(&format!(
            "*{} / {} complexity / {} words*\n\n",
            report.profile.doc_type,
            report.profile.complexity.band,
            report.profile.complexity.word_count
        ));

        output.push_str("## Expert Panel\n\n");
        output.push_str("| Agent | Role | Score |\n|---|---|---|\n");
        for scored in &report.selection.selected {
            output.push_str(&format!(
                "| {} | {} | {:.1} |\n",
                scored.agent.name, scored.agent.role, scored.score.total
            ));
        }
        output.push('\n');

        output.push_str("## Executive Summary\n\n");
        output.push_str(&report.synthesis.executive_summary);
        output.push_str("\n\n");

        output.push_str("## Consensus\n\n");
        output.push_str(&format!(
            "Overall agreement: {:.0}%\n\n",
            report.synthesis.consensus.overall_agreement * 100.0
        ));
        for theme in &report.synthesis.consensus.themes {
            output.push_str(&format!(
                "- **{}**: {} mentions, {:.0}% agreement\n",
                theme.theme,
                theme.mentions,
                theme.agreement * 100.0
            ));
        }
        if !report.synthesis.consensus.recommendations.is_empty() {
            output.push_str("\n### Recommendations\n\n");
            for cluster in &report.synthesis.consensus.recommendations {
                output.push_str(&format!(
                    "- [{}] {} (supported by {})\n",
                    cluster.priority.as_str(),
                    cluster.text,
                    cluster.supporters.join(", ")
                ));
            }
        }
        output.push('\n');

        if !report.synthesis.divergences.is_empty() {
            output.push_str("## Divergent Views\n\n");
            for divergence in &report.synthesis.divergences {
                output.push_str(&format!(
                    "### {} (severity {})\n\n",
                    divergence.topic, divergence.severity
                ));
                for position in &divergence.positions {
                    output.push_str(&format!("- **{}**: {}\n", position.agent, position.view));
                }
                output.push('\n');
            }
        }

        output.push_str("## Risk Assessment\n\n");
        output.push_str(&format!(
            "Overall exposure: {:.0}%\n\n",
            report.synthesis.risks.overall_exposure * 100.0
        ));
        if !report.synthesis.risks.risks.is_empty() {
            output.push_str("| Risk | Category | Severity | Likelihood | Raised by |\n");
            output.push_str("|---|---|---|---|---|\n");
            for risk in &report.synthesis.risks.risks {
                output.push_str(&format!(
                    "| {} | {} | {} | {:.0}% | {} |\n",
                    risk.description,
                    risk.category.as_str(),
                    risk.severity,
                    risk.likelihood * 100.0,
                    risk.raised_by
                ));
            }
            output.push('\n');
        }
        let plan = report.synthesis.risks.mitigation_plan();
        if !plan.is_empty() {
            output.push_str("### Mitigation Plan\n\n");
            for step in plan {
                output.push_str(&format!(
                    "- [{}] {} ({})\n",
                    step.priority, step.mitigation, step.timeline
                ));
            }
            output.push('\n');
        }

        if !report.synthesis.opportunities.is_empty() {
            output.push_str("## Opportunities\n\n");
            for opportunity in &report.synthesis.opportunities {
                output.push_str(&format!(
                    "- {} (impact {:.1}, feasibility {:.1})\n",
                    opportunity.description, opportunity.impact, opportunity.feasibility
                ));
            }
            output.push('\n');
        }

        output.push_str("## Roadmap\n\n");
        for phase in &report.synthesis.roadmap.phases {
            output.push_str(&format!(
                "### {} ({}-{} weeks)\n\n",
                phase.stage.as_str(),
                phase.duration_weeks.0,
                phase.duration_weeks.1
            ));
            output.push_str(&format!("Milestone: {}\n\n", phase.milestone));
            for task in &phase.tasks {
                output.push_str(&format!("- {}\n", task));
            }
            output.push('\n');
        }
        output.push_str(&format!(
            "Estimated total: ~{} weeks\n\n",
            report.synthesis.roadmap.estimated_total_weeks
        ));

        output.push_str("## Action Plan\n\n");
        Self::action_bucket(&mut output, "Immediate", &report.synthesis.action_plan.immediate);
        Self::action_bucket(&mut output, "Short term", &report.synthesis.action_plan.short_term);
        Self::action_bucket(&mut output, "Long term", &report.synthesis.action_plan.long_term);

        let confidence = &report.synthesis.confidence;
        output.push_str("## Run Details\n\n");
        output.push_str(&format!(
            "- Confidence: overall {:.2}, consensus {:.2}, expertise {:.2}, depth {:.2}\n",
            confidence.overall_confidence,
            confidence.consensus_strength,
            confidence.expertise_alignment,
            confidence.analysis_depth
        ));
        output.push_str(&format!(
            "- Responses: {} total, {} failed, {} offline, {} duplicate\n",
            report.metrics.total_responses,
            report.metrics.failed_responses,
            report.metrics.offline_responses,
            report.metrics.duplicate_responses
        ));
        output.push_str(&format!(
            "- Session {} finished in {}ms\n",
            report.metadata.session_id, report.metadata.duration_ms
        ));

        output
    }

    fn action_bucket(output: &mut String, label: &str, actions: &[String]) {
        if actions.is_empty() {
            return;
        }
        output.push_str(&format!("### {}\n\n", label));
        for action in actions {
            output.push_str(&format!("- {}\n", action));
        }
        output.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, report: &WorkflowReport) -> String {
        Self::format(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{
        classify, select_agents, AgentCatalog, AgentResponse, Phase, SelectionCriteria,
        Synthesizer, Task, WorkflowSession,
    };

    #[test]
    fn test_markdown_has_headings_and_table() {
        let mut session = WorkflowSession::new(Task::new("Review the data pipeline"));
        session.record_response(AgentResponse::success(
            "lead-architect",
            "Lead Architect",
            "Lead Architect",
            Phase::Analysis,
            "The main concern is a critical security vulnerability in the ingestion layer.",
        ));
        let profile = classify("# Data Pipeline\nStreaming ingestion with encryption.");
        let selection = select_agents(
            AgentCatalog::global(),
            &profile,
            &SelectionCriteria::default(),
        );
        let synthesis = Synthesizer::new().synthesize(session.responses());
        let report = WorkflowReport::assemble(&session, profile, selection, synthesis);

        let md = MarkdownFormatter::format(&report);
        assert!(md.starts_with("# Roundtable Review:"));
        assert!(md.contains("## Expert Panel"));
        assert!(md.contains("| Agent | Role | Score |"));
        assert!(md.contains("## Risk Assessment"));
        assert!(md.contains("## Action Plan"));
    }
}
