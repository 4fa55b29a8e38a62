//! Output formatting

pub mod human;
pub mod json;

use crate::cli::OutputFormat;
use crate::core::error::Result;
use crate::index::IndexedProject;
use crate::trace::WalkthroughStep;

/// Format an index for output
pub fn format_index(project: &IndexedProject, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::format_index(project)),
        OutputFormat::Json => json::format_index(project),
    }
}

/// Format trace steps for output
///
/// `total` is the number of steps the tracer produced before any display limit.
pub fn format_steps(
    question: &str,
    steps: &[WalkthroughStep],
    total: usize,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::format_steps(question, steps, total)),
        OutputFormat::Json => json::format_steps(question, steps, total),
    }
}
