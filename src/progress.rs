//! Progress reporting for indexing and tracing
//!
//! Progress is an optional observer: passing a listener never changes the
//! value an operation returns. New event variants may be added, so consumers
//! should ignore variants they do not recognise.

use serde::{Deserialize, Serialize};

// =============================================================================
// EVENT TYPES
// =============================================================================

/// Events emitted while indexing or tracing a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ProgressEvent {
    /// A file passed the path and size filters
    Discovered { scanned: usize, current: String },
    /// A file's content was loaded (or skipped)
    Loaded {
        loaded: usize,
        total: usize,
        current: String,
    },
    /// Indexing moved to a new stage
    Stage { stage: IndexStage },
    /// The tracer finished scanning a file
    FileTraced { file: String, steps: usize },
    /// The entry-point walk found nothing; keyword-matched files are used instead
    FallbackStarted { candidates: usize },
}

/// Stages of project indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexStage {
    Discovery,
    Frameworks,
    Imports,
    Complete,
}

// =============================================================================
// LISTENER
// =============================================================================

/// Receives progress events
///
/// Discovery loads files on a thread pool, so listeners must be `Sync` and
/// may observe `Loaded` events out of order.
pub trait ProgressListener: Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

impl<F> ProgressListener for F
where
    F: Fn(&ProgressEvent) + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Forward an event to an optional listener
pub(crate) fn emit(listener: Option<&dyn ProgressListener>, event: ProgressEvent) {
    if let Some(listener) = listener {
        listener.on_progress(&event);
    }
}
