//! Execution Tracer
//!
//! Walks an indexed project from its entry points, following relative
//! imports that look related to the question, and collects an annotated
//! step for every line that mentions a question keyword:
//! - Primary: depth-first walk from each entry point, visited-set guarded
//! - Fallback: when the walk yields nothing, scan the top keyword-matched
//!   files (entry points first) without following imports
//!
//! @module trace/tracer

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::context::{context_window, slice_lines, FileCache};
use super::keywords::{extract_keywords, first_match};
use super::resolve::resolve_import;
use super::shape::describe_line;
use super::types::WalkthroughStep;
use crate::index::{IndexedProject, ProjectFile};
use crate::parse::extract_imports;
use crate::progress::{emit, ProgressEvent, ProgressListener};

/// Lines of context kept before a matched line
pub const CONTEXT_BEFORE: usize = 2;
/// Lines of context kept after a matched line
pub const CONTEXT_AFTER: usize = 5;
/// Files scanned by the fallback strategy
pub const FALLBACK_FILE_LIMIT: usize = 5;

// =============================================================================
// TRACER
// =============================================================================

/// Traces a plausible execution path through an indexed project
pub struct ExecutionTracer<'a> {
    project: &'a IndexedProject,
    files: HashMap<&'a str, &'a ProjectFile>,
    cache: FileCache,
    listener: Option<&'a dyn ProgressListener>,
}

/// Result of scanning one file
struct FileScan {
    steps: Vec<WalkthroughStep>,
    /// Import targets that appeared on matched lines
    links: Vec<String>,
    /// All import targets of the file
    imports: Vec<String>,
}

impl<'a> ExecutionTracer<'a> {
    pub fn new(project: &'a IndexedProject) -> Self {
        Self {
            project,
            files: project.files.iter().map(|f| (f.path.as_str(), f)).collect(),
            cache: FileCache::new(&project.root),
            listener: None,
        }
    }

    /// Attach an optional progress listener
    pub fn with_listener(mut self, listener: Option<&'a dyn ProgressListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Trace a question through the project
    ///
    /// Never fails: unreadable files are skipped and a question without
    /// keywords yields no steps.
    pub fn trace(&mut self, question: &str) -> Vec<WalkthroughStep> {
        let keywords = extract_keywords(question);
        if keywords.is_empty() {
            debug!("Question has no keywords");
            return Vec::new();
        }
        debug!(?keywords, "Tracing question");

        let project = self.project;
        let mut steps = Vec::new();
        let mut visited: HashSet<&'a str> = HashSet::new();

        for entry in &project.entry_points {
            self.walk_from(entry, &keywords, &mut visited, &mut steps);
        }

        if steps.is_empty() {
            self.fallback(&keywords, &mut steps);
        }

        info!(
            steps = steps.len(),
            files_visited = visited.len(),
            "Trace complete"
        );
        steps
    }

    /// Depth-first walk from one entry point
    ///
    /// An explicit stack replaces recursion; children are pushed in reverse
    /// so they are visited in source order.
    fn walk_from(
        &mut self,
        entry: &str,
        keywords: &[String],
        visited: &mut HashSet<&'a str>,
        steps: &mut Vec<WalkthroughStep>,
    ) {
        let mut stack: Vec<&'a str> = match self.files.get(entry) {
            Some(&file) => vec![file.path.as_str()],
            None => return,
        };

        while let Some(path) = stack.pop() {
            if !visited.insert(path) {
                continue;
            }

            let Some(scan) = self.scan_file(path, keywords, steps.len()) else {
                // Unreadable: abandon this branch
                continue;
            };
            steps.extend(scan.steps);

            let next = self.imports_to_follow(path, keywords, &scan.imports, &scan.links);
            for child in next.into_iter().rev() {
                if !visited.contains(child) {
                    stack.push(child);
                }
            }
        }
    }

    /// Resolved paths of the imports worth following from `path`
    ///
    /// An import is followed when its target mentions a keyword or when it
    /// appears on a line that mentions one.
    fn imports_to_follow(
        &self,
        path: &str,
        keywords: &[String],
        imports: &[String],
        links: &[String],
    ) -> Vec<&'a str> {
        let mut targets: Vec<&String> = imports.iter().collect();
        targets.extend(links.iter().filter(|l| !imports.contains(*l)));

        let mut next: Vec<&'a str> = Vec::new();
        for target in targets {
            let lowered = target.to_lowercase();
            let related = first_match(keywords, &lowered).is_some() || links.contains(target);
            if !related {
                continue;
            }

            let Some(resolved) = resolve_import(path, target, |p| self.files.contains_key(p)) else {
                continue;
            };
            if let Some(&file) = self.files.get(resolved.as_str()) {
                let child = file.path.as_str();
                if !next.contains(&child) {
                    next.push(child);
                }
            }
        }
        next
    }

    /// Keyword-matched files, entry points first, scanned without following imports
    fn fallback(&mut self, keywords: &[String], steps: &mut Vec<WalkthroughStep>) {
        let project = self.project;
        let mut candidates: Vec<&'a ProjectFile> = project
            .files
            .iter()
            .filter(|f| file_mentions(f, keywords))
            .collect();
        candidates.sort_by_key(|f| !f.is_entry);
        candidates.truncate(FALLBACK_FILE_LIMIT);

        debug!(candidates = candidates.len(), "Using keyword-matched fallback");
        emit(
            self.listener,
            ProgressEvent::FallbackStarted {
                candidates: candidates.len(),
            },
        );

        for file in candidates {
            if let Some(scan) = self.scan_file(&file.path, keywords, steps.len()) {
                steps.extend(scan.steps);
            }
        }
    }

    /// Scan every line of a file for keywords; None if it has no readable text
    fn scan_file(&mut self, path: &str, keywords: &[String], first_index: usize) -> Option<FileScan> {
        let file = *self.files.get(path)?;
        let lines = self.cache.lines(file)?;

        let mut steps = Vec::new();
        let mut links: Vec<String> = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let lowered = line.to_lowercase();
            let Some(keyword) = first_match(keywords, &lowered) else {
                continue;
            };

            let line_number = idx + 1;
            let (start, end) = context_window(line_number, lines.len(), CONTEXT_BEFORE, CONTEXT_AFTER);
            let description = describe_line(line, keyword);
            let links_to = file
                .language
                .map(|language| extract_imports(line, language))
                .unwrap_or_default();

            for link in &links_to {
                if !links.contains(link) {
                    links.push(link.clone());
                }
            }

            steps.push(WalkthroughStep {
                index: first_index + steps.len(),
                file: file.path.clone(),
                line_range: [start, end],
                code: slice_lines(&lines, start, end),
                explanation: description.explanation,
                why_relevant: description.why_relevant,
                links_to,
            });
        }

        let imports = match self.project.import_graph.get(path) {
            Some(imports) => imports.clone(),
            None => file
                .language
                .map(|language| extract_imports(&lines.join("\n"), language))
                .unwrap_or_default(),
        };

        emit(
            self.listener,
            ProgressEvent::FileTraced {
                file: file.path.clone(),
                steps: steps.len(),
            },
        );

        Some(FileScan {
            steps,
            links,
            imports,
        })
    }
}

/// Whether a file's path or indexed content mentions any keyword
fn file_mentions(file: &ProjectFile, keywords: &[String]) -> bool {
    let path = file.path.to_lowercase();
    if first_match(keywords, &path).is_some() {
        return true;
    }
    file.content
        .as_deref()
        .map(|c| first_match(keywords, &c.to_lowercase()).is_some())
        .unwrap_or(false)
}

/// Trace a question through an indexed project
pub fn trace(
    question: &str,
    project: &IndexedProject,
    listener: Option<&dyn ProgressListener>,
) -> Vec<WalkthroughStep> {
    ExecutionTracer::new(project)
        .with_listener(listener)
        .trace(question)
}
