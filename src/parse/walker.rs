use crate::core::config::{FilterConfig, IndexConfig};
use crate::index::ProjectFile;
use crate::parse::languages::{is_entry_point, Language};
use crate::progress::{emit, ProgressEvent, ProgressListener};
use glob::Pattern;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

// =============================================================================
// PATH FILTER
// =============================================================================

/// Include/exclude glob matching over root-relative paths
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    /// Include patterns were given (even if none compiled)
    restrict: bool,
}

impl PathFilter {
    pub fn new(filters: &FilterConfig) -> Self {
        Self {
            include: compile_patterns(&filters.include),
            exclude: compile_patterns(&filters.exclude),
            restrict: !filters.include.is_empty(),
        }
    }

    /// Exclude always wins; an empty include list admits everything
    pub fn is_match(&self, rel_path: &str) -> bool {
        if self.exclude.iter().any(|p| p.matches(rel_path)) {
            return false;
        }
        !self.restrict || self.include.iter().any(|p| p.matches(rel_path))
    }
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!(pattern = %p, error = %e, "Ignoring invalid glob pattern");
                None
            }
        })
        .collect()
}

// =============================================================================
// FILE WALKER
// =============================================================================

/// A path that passed the filters, before its content is loaded
#[derive(Debug, Clone)]
struct Candidate {
    rel_path: String,
    abs_path: PathBuf,
    size: u64,
}

/// Walks project files respecting .gitignore, then loads them
pub struct FileWalker<'a> {
    root: PathBuf,
    filter: PathFilter,
    limits: IndexConfig,
    listener: Option<&'a dyn ProgressListener>,
}

impl<'a> FileWalker<'a> {
    pub fn new(root: &Path, filters: &FilterConfig, limits: &IndexConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            filter: PathFilter::new(filters),
            limits: limits.clone(),
            listener: None,
        }
    }

    /// Attach an optional progress listener
    pub fn with_listener(mut self, listener: Option<&'a dyn ProgressListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Walk and load every file that passes the filters, in discovery order
    pub fn discover(&self) -> Vec<ProjectFile> {
        let candidates = self.walk();
        let total = candidates.len();
        let loaded = AtomicUsize::new(0);

        // Parallel load; collect() keeps discovery order
        candidates
            .par_iter()
            .map(|candidate| {
                let file = self.load(candidate);
                emit(
                    self.listener,
                    ProgressEvent::Loaded {
                        loaded: loaded.fetch_add(1, Ordering::Relaxed) + 1,
                        total,
                        current: candidate.rel_path.clone(),
                    },
                );
                file
            })
            .collect()
    }

    /// Collect regular files under the root that pass the path and size filters
    fn walk(&self) -> Vec<Candidate> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .git_global(true)       // Respect global gitignore
            .git_exclude(true)      // Respect .git/info/exclude
            .require_git(false)     // Work even without .git
            .follow_links(false)
            .build();

        for entry in walker.flatten() {
            // Regular files only; symlinks and special files are skipped
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let Some(rel_path) = relative_path(&self.root, path) else {
                continue;
            };

            if !self.filter.is_match(&rel_path) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    debug!(path = %rel_path, error = %e, "Failed to stat file");
                    continue;
                }
            };

            // Skip files that are too large
            if size > self.limits.max_file_size {
                debug!(path = %rel_path, size, "Skipping oversized file");
                continue;
            }

            files.push(Candidate {
                rel_path: rel_path.clone(),
                abs_path: path.to_path_buf(),
                size,
            });
            emit(
                self.listener,
                ProgressEvent::Discovered {
                    scanned: files.len(),
                    current: rel_path,
                },
            );
        }

        files
    }

    /// Classify a candidate and read its content when it qualifies
    fn load(&self, candidate: &Candidate) -> ProjectFile {
        let language = Language::from_path(&candidate.abs_path);

        let content = match language {
            Some(_) if candidate.size < self.limits.max_content_size => {
                match std::fs::read_to_string(&candidate.abs_path) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        debug!(path = %candidate.rel_path, error = %e, "Failed to read file");
                        None
                    }
                }
            }
            _ => None,
        };

        let preview = content
            .as_deref()
            .map(|c| build_preview(c, self.limits.preview_lines));

        let mut file = ProjectFile {
            path: candidate.rel_path.clone(),
            size: candidate.size,
            language,
            content,
            preview,
            is_entry: false,
        };
        file.is_entry = is_entry_point(file.file_name());
        file
    }
}

/// First `max_lines` lines of a file
pub fn build_preview(content: &str, max_lines: usize) -> String {
    content.lines().take(max_lines).collect::<Vec<_>>().join("\n")
}

/// Root-relative path with `/` separators, or None if the path escapes the root
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Option<_>>()?;

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
