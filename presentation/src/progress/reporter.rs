//! Progress reporting for workflow execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use roundtable_application::ProgressNotifier;
use roundtable_domain::{AgentResponse, Phase, WorkflowState};
use std::sync::Mutex;

/// Reports progress during a workflow run with indicatif progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn response_marker(response: &AgentResponse) -> String {
        let mut marker = if response.is_success() {
            format!("{} {}", "v".green(), response.agent_name)
        } else {
            format!("{} {}", "x".red(), response.agent_name)
        };
        if response.offline {
            marker.push_str(&format!(" {}", "(offline)".dimmed()));
        }
        if response.duplicate {
            marker.push_str(&format!(" {}", "(duplicate)".yellow()));
        }
        marker
    }

    fn state_label(state: &WorkflowState) -> String {
        match state {
            WorkflowState::Init => "Starting session".to_string(),
            WorkflowState::DocumentAnalysis => "Analyzing document".to_string(),
            WorkflowState::AgentSelection => "Selecting the panel".to_string(),
            WorkflowState::Phase(phase) => format!("Running {}", phase.display_name()),
            WorkflowState::Synthesis => "Synthesizing consensus".to_string(),
            WorkflowState::Done => "Done".to_string(),
            WorkflowState::Failed => "Failed".to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_state_change(&self, state: WorkflowState) {
        let _ = self
            .multi
            .println(format!("{} {}", "->".cyan(), Self::state_label(&state).bold()));
    }

    fn on_phase_start(&self, phase: Phase, total_agents: usize) {
        let pb = self.multi.add(ProgressBar::new(total_agents as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name().to_string());
        pb.set_message("Dispatching...");

        *self.phase_bar.lock().unwrap() = Some(pb);
    }

    fn on_agent_response(&self, response: &AgentResponse) {
        if let Some(pb) = self.phase_bar.lock().unwrap().as_ref() {
            pb.set_message(Self::response_marker(response));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: Phase) {
        if let Some(pb) = self.phase_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} complete", phase.display_name().green()));
        }
    }

    fn on_strategy_pivot(&self, message: &str) {
        let _ = self
            .multi
            .println(format!("{} {}", "!".yellow().bold(), message.yellow()));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_state_change(&self, state: WorkflowState) {
        println!("{} {}", "->".cyan(), ProgressReporter::state_label(&state).bold());
    }

    fn on_phase_start(&self, phase: Phase, total_agents: usize) {
        println!(
            "{} {} ({} agents)",
            "->".cyan(),
            phase.display_name().bold(),
            total_agents
        );
    }

    fn on_agent_response(&self, response: &AgentResponse) {
        println!("  {}", ProgressReporter::response_marker(response));
    }

    fn on_phase_complete(&self, _phase: Phase) {
        println!();
    }

    fn on_strategy_pivot(&self, message: &str) {
        println!("  {} {}", "!".yellow().bold(), message.yellow());
    }
}
