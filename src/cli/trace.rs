//! Trace command implementation
//!
//! Indexes the project, then walks the code relevant to a question.
//!
//! @module cli/trace

use crate::cli::{print_progress, OutputFormat, TraceArgs};
use crate::core::error::Result;
use crate::index::ProjectIndexer;
use crate::output::format_steps;
use crate::progress::ProgressListener;
use crate::trace::ExecutionTracer;
use std::time::Instant;
use tracing::info;

/// Run the trace command
pub fn run(args: TraceArgs) -> Result<()> {
    let root = args.project.root()?;
    let config = args.project.config()?;

    let listener: Option<&dyn ProgressListener> = if args.project.verbose {
        Some(&print_progress)
    } else {
        None
    };

    let start = Instant::now();
    let project = ProjectIndexer::new(config)
        .with_listener(listener)
        .index(&root)?;

    let steps = ExecutionTracer::new(&project)
        .with_listener(listener)
        .trace(&args.question);
    info!(
        steps = steps.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Trace finished"
    );

    // Presentation limit only; the tracer itself never caps output
    let shown = match args.limit {
        Some(limit) => &steps[..limit.min(steps.len())],
        None => &steps[..],
    };

    let output = format_steps(
        &args.question,
        shown,
        steps.len(),
        OutputFormat::from_json_flag(args.json),
    )?;
    print!("{}", output);

    Ok(())
}
