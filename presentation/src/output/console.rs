//! Console output formatter for workflow reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use roundtable_domain::WorkflowReport;

/// Formats workflow reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete workflow report
    pub fn format(report: &WorkflowReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Roundtable Review"));
        output.push('\n');

        // Document profile
        output.push_str(&format!(
            "{} {}\n",
            "Document:".cyan().bold(),
            report.profile.title
        ));
        output.push_str(&format!(
            "{} {} / {} complexity / {} words\n",
            "Profile:".cyan().bold(),
            report.profile.doc_type,
            report.profile.complexity.band,
            report.profile.complexity.word_count
        ));
        if !report.profile.domains.is_empty() {
            let domains: Vec<String> = report
                .profile
                .domains
                .iter()
                .map(|d| format!("{} ({})", d.domain, d.score))
                .collect();
            output.push_str(&format!(
                "{} {}\n",
                "Domains:".cyan().bold(),
                domains.join(", ")
            ));
        }

        // Panel
        output.push_str(&Self::section_header("Expert Panel"));
        for scored in &report.selection.selected {
            output.push_str(&format!(
                "  {} {} {}\n",
                format!("{:5.1}", scored.score.total).dimmed(),
                scored.agent.name.bold(),
                format!("({})", scored.agent.role).dimmed()
            ));
        }
        output.push_str(&format!(
            "  {} {:.0}% domain / {:.0}% capability / {:.0}% overall\n",
            "Coverage:".dimmed(),
            report.selection.coverage.domain_coverage * 100.0,
            report.selection.coverage.capability_coverage * 100.0,
            report.selection.coverage.overall * 100.0
        ));

        // Executive summary
        output.push_str(&Self::section_header("Executive Summary"));
        output.push_str(&format!("\n{}\n", report.synthesis.executive_summary));

        // Consensus
        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&format!(
            "\n{} {:.0}%\n",
            "Overall agreement:".bold(),
            report.synthesis.consensus.overall_agreement * 100.0
        ));
        for theme in &report.synthesis.consensus.themes {
            let marker = if theme.consensus {
                "v".green()
            } else {
                "~".yellow()
            };
            output.push_str(&format!(
                "  {} {} ({} mentions, {:.0}% agreement)\n",
                marker,
                theme.theme,
                theme.mentions,
                theme.agreement * 100.0
            ));
        }
        for cluster in &report.synthesis.consensus.recommendations {
            output.push_str(&format!(
                "  {} [{}] {}\n",
                "*".cyan(),
                cluster.priority.as_str(),
                cluster.text
            ));
        }

        // Divergences
        if !report.synthesis.divergences.is_empty() {
            output.push_str(&Self::section_header("Divergent Views"));
            for divergence in &report.synthesis.divergences {
                output.push_str(&format!(
                    "\n{} (severity {})\n",
                    divergence.topic.yellow().bold(),
                    divergence.severity
                ));
                for position in &divergence.positions {
                    output.push_str(&format!(
                        "  {} {}: {}\n",
                        "-".dimmed(),
                        position.agent.bold(),
                        position.view
                    ));
                }
            }
        }

        // Risks
        output.push_str(&Self::section_header("Risk Assessment"));
        output.push_str(&format!(
            "\n{} {:.0}%\n",
            "Overall exposure:".bold(),
            report.synthesis.risks.overall_exposure * 100.0
        ));
        for risk in report.synthesis.risks.critical_risks() {
            output.push_str(&format!(
                "  {} [{}] sev {} / {:.0}% likely: {}\n",
                "!".red().bold(),
                risk.category.as_str(),
                risk.severity,
                risk.likelihood * 100.0,
                risk.description
            ));
        }
        for step in report.synthesis.risks.mitigation_plan() {
            output.push_str(&format!(
                "  {} [{}] {} ({})\n",
                "+".green(),
                step.priority,
                step.mitigation,
                step.timeline
            ));
        }

        // Opportunities
        if !report.synthesis.opportunities.is_empty() {
            output.push_str(&Self::section_header("Opportunities"));
            for opportunity in report.synthesis.opportunities.iter().take(5) {
                output.push_str(&format!(
                    "  {} {} (impact {:.1}, feasibility {:.1})\n",
                    "*".green(),
                    opportunity.description,
                    opportunity.impact,
                    opportunity.feasibility
                ));
            }
        }

        // Roadmap
        output.push_str(&Self::section_header("Roadmap"));
        for phase in &report.synthesis.roadmap.phases {
            output.push_str(&format!(
                "\n{} ({}-{} weeks) -> {}\n",
                phase.stage.as_str().to_uppercase().bold(),
                phase.duration_weeks.0,
                phase.duration_weeks.1,
                phase.milestone
            ));
            for task in &phase.tasks {
                output.push_str(&format!("  {} {}\n", "-".dimmed(), task));
            }
        }
        output.push_str(&format!(
            "\n{} ~{} weeks\n",
            "Estimated total:".bold(),
            report.synthesis.roadmap.estimated_total_weeks
        ));

        // Action plan
        output.push_str(&Self::section_header("Action Plan"));
        Self::action_bucket(&mut output, "Immediate", &report.synthesis.action_plan.immediate);
        Self::action_bucket(&mut output, "Short term", &report.synthesis.action_plan.short_term);
        Self::action_bucket(&mut output, "Long term", &report.synthesis.action_plan.long_term);

        // Confidence + run metrics
        output.push_str(&Self::section_header("Confidence"));
        let confidence = &report.synthesis.confidence;
        output.push_str(&format!(
            "  overall {:.2} / consensus {:.2} / expertise {:.2} / depth {:.2}\n",
            confidence.overall_confidence,
            confidence.consensus_strength,
            confidence.expertise_alignment,
            confidence.analysis_depth
        ));
        output.push_str(&format!(
            "\n{} {} responses ({} failed, {} offline, {} duplicate) in {}ms\n",
            "Run:".dimmed(),
            report.metrics.total_responses,
            report.metrics.failed_responses,
            report.metrics.offline_responses,
            report.metrics.duplicate_responses,
            report.metadata.duration_ms
        ));

        output.push_str(&Self::footer());

        output
    }

    fn action_bucket(output: &mut String, label: &str, actions: &[String]) {
        if actions.is_empty() {
            return;
        }
        output.push_str(&format!("\n{}\n", label.cyan().bold()));
        for action in actions {
            output.push_str(&format!("  * {}\n", action));
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
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

    fn sample_report() -> WorkflowReport {
        let mut session = WorkflowSession::new(Task::new("Review the payment architecture"));
        session.record_response(AgentResponse::success(
            "lead-architect",
            "Lead Architect",
            "Lead Architect",
            Phase::Analysis,
            "I recommend adding rate limiting. The main concern is security risk under load.",
        ));
        session.record_response(AgentResponse::success(
            "security-architect",
            "Security Architect",
            "Security Architect",
            Phase::Validation,
            "This is an opportunity to improve authentication. We should implement token rotation.",
        ));

        let profile = classify("# Payment Gateway\nA microservices payment architecture with encryption.");
        let selection = select_agents(
            AgentCatalog::global(),
            &profile,
            &SelectionCriteria::default(),
        );
        let synthesis = Synthesizer::new().synthesize(session.responses());
        WorkflowReport::assemble(&session, profile, selection, synthesis)
    }

    #[test]
    fn test_console_format_has_all_sections() {
        colored::control::set_override(false);
        let report = sample_report();
        let text = ConsoleFormatter::format(&report);

        assert!(text.contains("Roundtable Review"));
        assert!(text.contains("Expert Panel"));
        assert!(text.contains("Executive Summary"));
        assert!(text.contains("Consensus"));
        assert!(text.contains("Risk Assessment"));
        assert!(text.contains("Roadmap"));
        assert!(text.contains("Action Plan"));
        assert!(text.contains("Confidence"));
    }

    #[test]
    fn test_console_format_lists_panel_members() {
        colored::control::set_override(false);
        let report = sample_report();
        let text = ConsoleFormatter::format(&report);

        for scored in &report.selection.selected {
            assert!(text.contains(&scored.agent.name));
        }
    }
}
