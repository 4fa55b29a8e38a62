//! Codewalk CLI entry point

use clap::Parser;
use codewalk::cli::{Cli, Commands};
use codewalk::core::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("CODEWALK_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index(args) => codewalk::cli::index::run(args),
        Commands::Trace(args) => codewalk::cli::trace::run(args),
    }
}
