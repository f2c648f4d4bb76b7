//! Output formatter trait

use roundtable_domain::WorkflowReport;

/// Trait for rendering a workflow report to a string
pub trait OutputFormatter {
    fn format(&self, report: &WorkflowReport) -> String;
}
