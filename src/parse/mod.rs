mod imports;
mod languages;
mod walker;

pub use imports::extract_imports;
pub use languages::{is_entry_point, Language};
pub use walker::{build_preview, FileWalker, PathFilter};
