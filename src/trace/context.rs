//! Code Context Engine
//!
//! Provides file text for the tracer: content already held by the index is
//! used directly, anything else is read through from disk on demand and
//! cached as lines.
//!
//! @module trace/context

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::index::ProjectFile;

// =============================================================================
// FILE CACHE
// =============================================================================

struct CachedLines {
    lines: Rc<Vec<String>>,
    bytes: usize,
}

/// Cache of file contents as line vectors
///
/// Uses a simple eviction strategy when the memory limit is reached.
pub struct FileCache {
    /// Cached file contents (relative path -> lines, bytes charged)
    cache: HashMap<String, CachedLines>,
    /// Files that could not be read; never retried within a run
    unreadable: HashSet<String>,
    /// Total bytes cached (approximate)
    bytes_cached: usize,
    /// Maximum bytes to cache
    max_bytes: usize,
    /// Project root for resolving relative paths
    project_root: PathBuf,
}

impl FileCache {
    /// Create a new file cache with default 16MB limit
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self::with_capacity(project_root, 16 * 1024 * 1024)
    }

    /// Create with custom memory limit
    pub fn with_capacity(project_root: impl AsRef<Path>, max_bytes: usize) -> Self {
        Self {
            cache: HashMap::new(),
            unreadable: HashSet::new(),
            bytes_cached: 0,
            max_bytes,
            project_root: project_root.as_ref().to_path_buf(),
        }
    }

    /// Lines of a file, or None when it has no readable text
    ///
    /// Files without a language never have text. Files whose content was
    /// skipped during indexing are read from disk.
    pub fn lines(&mut self, file: &ProjectFile) -> Option<Rc<Vec<String>>> {
        file.language?;

        if let Some(cached) = self.cache.get(&file.path) {
            return Some(Rc::clone(&cached.lines));
        }
        if self.unreadable.contains(&file.path) {
            return None;
        }

        let content = match &file.content {
            Some(content) => content.clone(),
            None => match fs::read_to_string(self.project_root.join(&file.path)) {
                Ok(content) => content,
                Err(e) => {
                    debug!(path = %file.path, error = %e, "Failed to read file for trace");
                    self.unreadable.insert(file.path.clone());
                    return None;
                }
            },
        };

        let bytes = content.len();

        // Evict if needed
        while self.bytes_cached + bytes > self.max_bytes && !self.cache.is_empty() {
            // Simple eviction: remove first entry
            if let Some(key) = self.cache.keys().next().cloned() {
                if let Some(evicted) = self.cache.remove(&key) {
                    self.bytes_cached -= evicted.bytes;
                }
            }
        }

        // Parse into lines
        let lines: Rc<Vec<String>> = Rc::new(content.lines().map(|s| s.to_string()).collect());
        self.bytes_cached += bytes;
        self.cache.insert(
            file.path.clone(),
            CachedLines {
                lines: Rc::clone(&lines),
                bytes,
            },
        );

        Some(lines)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            files_cached: self.cache.len(),
            bytes_cached: self.bytes_cached,
            max_bytes: self.max_bytes,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    pub files_cached: usize,
    pub bytes_cached: usize,
    pub max_bytes: usize,
}

// =============================================================================
// LINE WINDOWS
// =============================================================================

/// 1-based inclusive window around `line`, clamped to `1..=total`
pub fn context_window(line: usize, total: usize, before: usize, after: usize) -> (usize, usize) {
    let start = line.saturating_sub(before).max(1);
    let end = (line + after).min(total).max(start);
    (start, end)
}

/// Text of a 1-based inclusive line range
pub fn slice_lines(lines: &[String], start: usize, end: usize) -> String {
    let start_idx = start.saturating_sub(1).min(lines.len());
    let end_idx = end.min(lines.len()).max(start_idx);
    lines[start_idx..end_idx].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Language;
    use tempfile::TempDir;

    fn project_file(path: &str, language: Option<Language>, content: Option<&str>) -> ProjectFile {
        ProjectFile {
            path: path.to_string(),
            size: content.map(|c| c.len() as u64).unwrap_or(0),
            language,
            content: content.map(str::to_string),
            preview: None,
            is_entry: false,
        }
    }

    #[test]
    fn test_uses_indexed_content() {
        let temp = TempDir::new().unwrap();
        let mut cache = FileCache::new(temp.path());
        let file = project_file("a.ts", Some(Language::TypeScript), Some("one\ntwo"));

        let lines = cache.lines(&file).unwrap();
        assert_eq!(lines.as_slice(), ["one", "two"]);
        assert_eq!(cache.stats().files_cached, 1);
    }

    #[test]
    fn test_reads_through_to_disk() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("big.py"), "import os\nprint(os.name)\n").unwrap();

        let mut cache = FileCache::new(temp.path());
        let file = project_file("big.py", Some(Language::Python), None);

        let lines = cache.lines(&file).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "import os");
    }

    #[test]
    fn test_unclassified_and_missing_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.md"), "explain everything").unwrap();

        let mut cache = FileCache::new(temp.path());
        assert!(cache.lines(&project_file("notes.md", None, None)).is_none());
        assert!(cache
            .lines(&project_file("gone.ts", Some(Language::TypeScript), None))
            .is_none());
    }

    #[test]
    fn test_eviction() {
        let temp = TempDir::new().unwrap();
        let mut cache = FileCache::with_capacity(temp.path(), 10);

        cache.lines(&project_file("a.js", Some(Language::JavaScript), Some("12345678")));
        cache.lines(&project_file("b.js", Some(Language::JavaScript), Some("abcdefgh")));

        let stats = cache.stats();
        assert_eq!(stats.files_cached, 1);
        assert!(stats.bytes_cached <= stats.max_bytes);
    }

    #[test]
    fn test_eviction_releases_exact_bytes() {
        let temp = TempDir::new().unwrap();
        let mut cache = FileCache::with_capacity(temp.path(), 16);

        cache.lines(&project_file("a.js", Some(Language::JavaScript), Some("1234
5678
")));
        assert_eq!(cache.stats().bytes_cached, 10);

        cache.lines(&project_file("b.js", Some(Language::JavaScript), Some("abcd
efgh
ijkl
")));
        let stats = cache.stats();
        assert_eq!(stats.files_cached, 1);
        assert_eq!(stats.bytes_cached, 15);

        cache.lines(&project_file("c.js", Some(Language::JavaScript), Some("x")));
        let stats = cache.stats();
        assert_eq!(stats.files_cached, 2);
        assert_eq!(stats.bytes_cached, 16);
    }

    #[test]
    fn test_context_window_clamps() {
        assert_eq!(context_window(1, 10, 2, 5), (1, 6));
        assert_eq!(context_window(5, 10, 2, 5), (3, 10));
        assert_eq!(context_window(9, 10, 2, 5), (7, 10));
        assert_eq!(context_window(1, 1, 2, 5), (1, 1));
    }

    #[test]
    fn test_slice_lines() {
        let lines: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(slice_lines(&lines, 2, 3), "b\nc");
        assert_eq!(slice_lines(&lines, 1, 10), "a\nb\nc\nd");
    }
}
