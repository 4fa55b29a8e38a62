//! Codewalk Trace - Heuristic Execution Path Tracing
//!
//! Turns a natural-language question into an ordered list of annotated code
//! spans by walking the import graph from the project's entry points:
//! - Keyword extraction from the question
//! - Line shape classification for step explanations
//! - Relative-only import resolution
//! - Read-through file cache for content skipped at index time
//!
//! @module trace

pub mod context;
pub mod keywords;
pub mod resolve;
pub mod shape;
pub mod tracer;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use context::{CacheStats, FileCache};
pub use keywords::extract_keywords;
pub use resolve::{is_relative, resolve_import};
pub use shape::{classify_line, describe_line, LineDescription, LineShape};
pub use tracer::{trace, ExecutionTracer, CONTEXT_AFTER, CONTEXT_BEFORE, FALLBACK_FILE_LIMIT};
pub use types::WalkthroughStep;
