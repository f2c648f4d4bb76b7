//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use roundtable_domain::WorkflowReport;

/// Serializes the whole workflow report as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format(report: &WorkflowReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &WorkflowReport) -> String {
        Self::format(report)
    }
}
