//! JSON output formatting

use serde::Serialize;

use crate::core::error::Result;
use crate::index::IndexedProject;
use crate::trace::WalkthroughStep;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceOutput<'a> {
    question: &'a str,
    total_steps: usize,
    steps: &'a [WalkthroughStep],
}

/// Format an index as JSON
pub fn format_index(project: &IndexedProject) -> Result<String> {
    Ok(serde_json::to_string_pretty(project)? + "\n")
}

/// Format trace steps as JSON
pub fn format_steps(question: &str, steps: &[WalkthroughStep], total: usize) -> Result<String> {
    let output = TraceOutput {
        question,
        total_steps: total,
        steps,
    };
    Ok(serde_json::to_string_pretty(&output)? + "\n")
}
