//! Codewalk - static execution-path walkthroughs for source trees
//!
//! Indexes a project (files, languages, frameworks, import graph) and traces
//! a plausible execution path for a natural-language question, without
//! running any project code.

pub mod cli;
pub mod core;
pub mod index;
pub mod output;
pub mod parse;
pub mod progress;
pub mod trace;

pub use core::config::Config;
pub use core::error::{Error, Result};
pub use index::{index_project, IndexedProject, ProjectFile};
pub use progress::{ProgressEvent, ProgressListener};
pub use trace::{trace, WalkthroughStep};
