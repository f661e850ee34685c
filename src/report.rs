//! Output formatting for analysis results.
//!
//! Two formats:
//! - Text: one line per issue, `<file>: Line <n>: <code> <message>`.
//!   This format is the compatibility contract consumed by existing
//!   tooling and must stay byte-exact.
//! - JSON: structured output for programmatic consumption.

use serde::{Deserialize, Serialize};

use crate::check::Issue;

/// JSON shape of one issue.
#[derive(Serialize, Deserialize)]
pub struct JsonIssue {
    pub file: String,
    pub line: usize,
    pub code: String,
    pub message: String,
}

impl From<&Issue> for JsonIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            file: issue.file.clone(),
            line: issue.line_num,
            code: issue.code.as_str().to_string(),
            message: issue.message.clone(),
        }
    }
}

/// Render the text report. Issues are expected in report order; an
/// empty slice renders the empty string.
pub fn render_text(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the JSON report.
pub fn render_json(issues: &[Issue]) -> anyhow::Result<String> {
    let entries: Vec<JsonIssue> = issues.iter().map(JsonIssue::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
