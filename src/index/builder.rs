//! Project Index Builder
//!
//! Turns a directory into an `IndexedProject`: discovery, entry points,
//! frameworks, languages and the import graph. Each stage consumes only the
//! discovered file list.
//!
//! @module index/builder

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use super::frameworks::detect_frameworks;
use super::types::{IndexedProject, ProjectFile};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::project::Project;
use crate::parse::{extract_imports, FileWalker, Language};
use crate::progress::{emit, IndexStage, ProgressEvent, ProgressListener};

// =============================================================================
// INDEXER
// =============================================================================

/// Builds a read-only index of a project directory
pub struct ProjectIndexer<'a> {
    config: Config,
    listener: Option<&'a dyn ProgressListener>,
}

impl<'a> ProjectIndexer<'a> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            listener: None,
        }
    }

    /// Attach an optional progress listener
    pub fn with_listener(mut self, listener: Option<&'a dyn ProgressListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Index a project root
    ///
    /// Fails only when the root does not exist or is not a directory.
    pub fn index(&self, root: &Path) -> Result<IndexedProject> {
        let start = Instant::now();
        let project = Project::from_path(root)?;
        info!(project = %project.name, root = %project.root.display(), "Indexing project");

        emit(self.listener, ProgressEvent::Stage { stage: IndexStage::Discovery });
        let files = FileWalker::new(&project.root, &self.config.filters, &self.config.index)
            .with_listener(self.listener)
            .discover();
        debug!(files = files.len(), "Discovery complete");

        let entry_points = entry_points(&files);

        emit(self.listener, ProgressEvent::Stage { stage: IndexStage::Frameworks });
        let frameworks = detect_frameworks(&project.root, &files);
        debug!(?frameworks, "Framework detection complete");

        let languages = languages(&files);

        emit(self.listener, ProgressEvent::Stage { stage: IndexStage::Imports });
        let import_graph = build_import_graph(&files);
        debug!(files_with_imports = import_graph.len(), "Import graph complete");

        let total_size = files.iter().map(|f| f.size).sum();

        let indexed = IndexedProject {
            root: project.root,
            name: project.name,
            files,
            entry_points,
            frameworks,
            languages,
            import_graph,
            total_size,
        };

        emit(self.listener, ProgressEvent::Stage { stage: IndexStage::Complete });
        info!(
            stats = %indexed.stats(),
            elapsed_ms = start.elapsed().as_millis(),
            "Indexing complete"
        );

        Ok(indexed)
    }
}

/// Index a project root with the given configuration
pub fn index_project(
    root: &Path,
    config: &Config,
    listener: Option<&dyn ProgressListener>,
) -> Result<IndexedProject> {
    ProjectIndexer::new(config.clone())
        .with_listener(listener)
        .index(root)
}

// =============================================================================
// STAGES
// =============================================================================

fn entry_points(files: &[ProjectFile]) -> Vec<String> {
    files
        .iter()
        .filter(|f| f.is_entry)
        .map(|f| f.path.clone())
        .collect()
}

fn languages(files: &[ProjectFile]) -> BTreeSet<Language> {
    files.iter().filter_map(|f| f.language).collect()
}

/// Extract imports for every loaded, classified file; empty results are dropped
fn build_import_graph(files: &[ProjectFile]) -> BTreeMap<String, Vec<String>> {
    files
        .par_iter()
        .filter_map(|file| {
            let content = file.content.as_deref()?;
            let language = file.language?;
            let imports = extract_imports(content, language);
            if imports.is_empty() {
                None
            } else {
                Some((file.path.clone(), imports))
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{FilterConfig, IndexConfig};
    use crate::core::error::Error;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "package.json", r#"{"dependencies": {"react": "^18"}}"#);
        write(root, "src/index.ts", "import { App } from './app';\nrender(App);\n");
        write(root, "src/app.tsx", "import React from 'react';\nexport const App = () => null;\n");
        write(root, "src/util.ts", "export const x = 1;\n");
        write(root, "scripts/__main__.py", "from .tasks import run\nrun()\n");
        write(root, "README.md", "# sample\n");
        temp
    }

    #[test]
    fn test_index_sample_project() {
        let temp = sample_project();
        let project = index_project(temp.path(), &Config::default(), None).unwrap();

        assert_eq!(project.files.len(), 6);
        assert!(project.frameworks.contains("React"));

        let mut entries = project.entry_points.clone();
        entries.sort();
        assert_eq!(entries, vec!["scripts/__main__.py", "src/index.ts"]);

        let languages: Vec<_> = project.languages.iter().map(|l| l.as_str()).collect();
        assert_eq!(languages, vec!["typescript", "typescriptreact", "python"]);

        assert_eq!(project.imports_of("src/index.ts"), ["./app"]);
        assert_eq!(project.imports_of("src/app.tsx"), ["react"]);
        assert_eq!(project.imports_of("scripts/__main__.py"), [".tasks"]);
        // No imports -> no entry
        assert!(!project.import_graph.contains_key("src/util.ts"));

        let total: u64 = project.files.iter().map(|f| f.size).sum();
        assert_eq!(project.total_size, total);
    }

    #[test]
    fn test_index_invariants() {
        let temp = sample_project();
        let project = index_project(temp.path(), &Config::default(), None).unwrap();

        let paths: HashSet<_> = project.files.iter().map(|f| f.path.as_str()).collect();
        assert!(project.entry_points.iter().all(|p| paths.contains(p.as_str())));
        assert!(project.import_graph.keys().all(|p| paths.contains(p.as_str())));
        assert!(project
            .files
            .iter()
            .filter(|f| f.content.is_some())
            .all(|f| f.language.is_some()));
    }

    #[test]
    fn test_index_is_idempotent() {
        let temp = sample_project();
        let first = index_project(temp.path(), &Config::default(), None).unwrap();
        let second = index_project(temp.path(), &Config::default(), None).unwrap();

        let as_set = |p: &IndexedProject| -> HashSet<(String, u64)> {
            p.files.iter().map(|f| (f.path.clone(), f.size)).collect()
        };
        assert_eq!(as_set(&first), as_set(&second));
        assert_eq!(first.frameworks, second.frameworks);
        assert_eq!(first.languages, second.languages);
        assert_eq!(first.import_graph, second.import_graph);
    }

    #[test]
    fn test_invalid_manifest_does_not_abort() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "package.json", "{ \"dependencies\": { \"react\"");
        write(temp.path(), "index.js", "console.log('hi');\n");

        let project = index_project(temp.path(), &Config::default(), None).unwrap();
        assert!(!project.frameworks.contains("React"));
        assert_eq!(project.entry_points, vec!["index.js"]);
    }

    #[test]
    fn test_size_ceiling_holds() {
        let temp = sample_project();
        write(temp.path(), "big.ts", &"// padding\n".repeat(100));

        let config = Config {
            index: IndexConfig {
                max_file_size: 512,
                max_content_size: 256,
                preview_lines: 5,
            },
            filters: FilterConfig::default(),
        };
        let project = index_project(temp.path(), &config, None).unwrap();

        assert!(project.file("big.ts").is_none());
        assert!(project.files.iter().all(|f| f.size <= 512));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = index_project(&temp.path().join("missing"), &Config::default(), None);
        assert!(matches!(result, Err(Error::ProjectNotFound { .. })));
    }

    #[test]
    fn test_stage_events() {
        use std::sync::Mutex;

        let temp = sample_project();
        let stages = Mutex::new(Vec::new());
        let listener = |event: &ProgressEvent| {
            if let ProgressEvent::Stage { stage } = event {
                stages.lock().unwrap().push(*stage);
            }
        };

        index_project(temp.path(), &Config::default(), Some(&listener)).unwrap();

        assert_eq!(
            stages.into_inner().unwrap(),
            vec![
                IndexStage::Discovery,
                IndexStage::Frameworks,
                IndexStage::Imports,
                IndexStage::Complete
            ]
        );
    }
}
