//! Output formatters for run reports
//!
//! Provides table, one-line summary and JSON output formats.

use crate::models::{RunSummary, Scenario, TestResult};

const RULE: &str = "==================================================";

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Summary,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "summary" => Some(OutputFormat::Summary),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format the final run report
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Summary => self.format_summary_brief(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push('\n');
        if summary.aborted {
            output.push_str(&self.paint("❌ API root endpoint failed, stopping tests", false));
            output.push('\n');
        }
        output.push_str(&format!(
            "📊 Final Results: {}/{} tests passed\n",
            summary.tests_passed, summary.tests_run
        ));

        output.push_str("\n📋 Detailed Test Results:\n");
        for result in &summary.results {
            output.push_str(&self.format_result(result));
        }

        output
    }

    /// One report line, plus the captured preview for failures
    fn format_result(&self, result: &TestResult) -> String {
        let mut line = self.paint(&result.to_string(), result.success);
        line.push('\n');
        if !result.success {
            line.push_str(&format!("   Error: {}\n", result.response_preview));
        }
        line
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{}/{} tests passed{}",
            summary.tests_passed,
            summary.tests_run,
            if summary.aborted { " (aborted)" } else { "" }
        )
    }

    fn paint(&self, text: &str, ok: bool) -> String {
        if !self.colorize {
            return text.to_string();
        }
        if ok {
            format!("\x1b[32m{text}\x1b[0m")
        } else {
            format!("\x1b[31m{text}\x1b[0m")
        }
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Render the scenario catalog
pub fn format_scenarios(detailed: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("\nAPI Scenarios ({} total)\n", Scenario::all().len()));
    output.push_str("──────────────────────────────────────────────────────\n");

    for scenario in Scenario::all() {
        if detailed {
            let path = if scenario.endpoint().is_empty() {
                "/api/".to_string()
            } else {
                format!("/api/{}", scenario.endpoint())
            };
            output.push_str(&format!(
                "  {}. {:24} {:4} {:14} expect {} [{}]{}\n",
                scenario.number(),
                scenario.name(),
                scenario.method(),
                path,
                scenario.expected_status(),
                scenario.category(),
                if scenario.is_gating() { " gating" } else { "" }
            ));
        } else {
            output.push_str(&format!("  {scenario}\n"));
        }
    }

    output
}
