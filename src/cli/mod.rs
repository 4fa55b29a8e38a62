//! CLI command definitions and handlers

pub mod index;
pub mod trace;

use clap::{Args, Parser, Subcommand};
use std::env;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::progress::ProgressEvent;

const LONG_ABOUT: &str = r#"
Static execution-path walkthroughs for source trees.

Codewalk indexes a project (files, languages, frameworks, import graph) and
traces a plausible path through it for a question, without running any code.

QUICK START:
    codewalk index                          Summarise the current project
    codewalk trace "how does auth work?"    Walk the code relevant to a question

FILTERS:
    --include <GLOB>    Only index matching paths (repeatable)
    --exclude <GLOB>    Never index matching paths (repeatable, wins over --include)

    .gitignore rules are always honored. Defaults can be set in
    $CODEWALK_HOME/config.toml under [filters] and [index].

LOGGING:
    CODEWALK_LOG=debug codewalk trace "..."
"#;

/// Static execution-path walkthroughs
#[derive(Parser, Debug)]
#[command(name = "codewalk")]
#[command(author, version)]
#[command(about = "Static execution-path walkthroughs for source trees")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index a project and print a summary
    #[command(visible_alias = "i")]
    Index(IndexArgs),

    /// Trace the code path relevant to a question
    #[command(visible_alias = "t")]
    Trace(TraceArgs),
}

/// Options shared by every command that indexes a project
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project path (default: current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Glob of paths to include (repeatable)
    #[arg(long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Glob of paths to exclude (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Print progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProjectArgs {
    /// Project root, defaulting to the current directory
    pub fn root(&self) -> Result<PathBuf> {
        match &self.project {
            Some(p) => Ok(p.clone()),
            None => env::current_dir().map_err(|e| Error::ConfigError {
                message: format!("Failed to get current directory: {}", e),
            }),
        }
    }

    /// Loaded configuration with command-line filters appended
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        config.filters = std::mem::take(&mut config.filters).with_extra(&self.include, &self.exclude);
        Ok(config)
    }
}

/// Arguments for the index command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    codewalk index                        Index current directory
    codewalk index -p ~/code/app          Index specific directory
    codewalk index --include 'src/**'     Only index src/
    codewalk index --json                 Full index as JSON")]
pub struct IndexArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the trace command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    codewalk trace \"how does auth work?\"
    codewalk trace \"where are payments charged\" -n 5
    codewalk trace \"session handling\" --json")]
pub struct TraceArgs {
    /// Question to trace
    pub question: String,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Max steps to print (default: all)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Progress printer used by `--verbose`
pub fn print_progress(event: &ProgressEvent) {
    match event {
        ProgressEvent::Discovered { scanned, current } => {
            eprintln!("  scanned {:>6}  {}", scanned, current)
        }
        ProgressEvent::Stage { stage } => eprintln!("stage: {:?}", stage),
        ProgressEvent::FileTraced { file, steps } => eprintln!("  traced {} ({} steps)", file, steps),
        ProgressEvent::FallbackStarted { candidates } => {
            eprintln!("no path from entry points; scanning {} matching files", candidates)
        }
        ProgressEvent::Loaded { .. } => {}
    }
}
