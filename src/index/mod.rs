//! Project indexing: discovery, classification and the import graph

mod builder;
mod frameworks;
mod types;

pub use builder::{index_project, ProjectIndexer};
pub use frameworks::{detect_frameworks, npm_frameworks};
pub use types::{IndexStats, IndexedProject, ProjectFile};
