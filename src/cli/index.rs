use crate::cli::{print_progress, IndexArgs, OutputFormat};
use crate::core::error::Result;
use crate::index::ProjectIndexer;
use crate::output::format_index;
use crate::progress::ProgressListener;
use tracing::info;

/// Run the index command
pub fn run(args: IndexArgs) -> Result<()> {
    let root = args.project.root()?;
    let config = args.project.config()?;

    let listener: Option<&dyn ProgressListener> = if args.project.verbose {
        Some(&print_progress)
    } else {
        None
    };

    let project = ProjectIndexer::new(config)
        .with_listener(listener)
        .index(&root)?;
    info!(project = %project.name, "Index built");

    let output = format_index(&project, OutputFormat::from_json_flag(args.json))?;
    print!("{}", output);

    Ok(())
}
