//! Project Index Data Structures
//!
//! @module index/types

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::parse::Language;

// =============================================================================
// PROJECT FILE
// =============================================================================

/// One discovered file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    /// Root-relative path using `/` separators
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Set only for recognised extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Full text, loaded only for classified files under the content ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Leading lines of `content`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub is_entry: bool,
}

impl ProjectFile {
    /// Basename of the file
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

// =============================================================================
// INDEXED PROJECT
// =============================================================================

/// The completed, read-only index of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedProject {
    pub root: PathBuf,
    pub name: String,
    /// Discovery order; not sorted
    pub files: Vec<ProjectFile>,
    pub entry_points: Vec<String>,
    pub frameworks: BTreeSet<String>,
    pub languages: BTreeSet<Language>,
    /// File path -> raw import targets, only for files with imports
    pub import_graph: BTreeMap<String, Vec<String>>,
    pub total_size: u64,
}

impl IndexedProject {
    /// Look up a file by its root-relative path
    pub fn file(&self, path: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Raw import targets of a file (empty when none were extracted)
    pub fn imports_of(&self, path: &str) -> &[String] {
        self.import_graph
            .get(path)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Summary counts for display
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            files: self.files.len(),
            loaded: self.files.iter().filter(|f| f.content.is_some()).count(),
            entry_points: self.entry_points.len(),
            import_edges: self.import_graph.values().map(|v| v.len()).sum(),
            total_size: self.total_size,
        }
    }
}

/// Statistics about an indexed project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub files: usize,
    pub loaded: usize,
    pub entry_points: usize,
    pub import_edges: usize,
    pub total_size: u64,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files ({} loaded), {} entry points, {} imports, {} bytes",
            self.files, self.loaded, self.entry_points, self.import_edges, self.total_size
        )
    }
}
