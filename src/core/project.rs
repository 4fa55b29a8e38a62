//! Project root resolution

use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A project root that is known to exist and be a directory
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute path to project root
    pub root: PathBuf,
    /// Name of the project (directory name)
    pub name: String,
}

impl Project {
    /// Create project from explicit path (must exist)
    pub fn from_path(path: &Path) -> Result<Self> {
        let root = path.canonicalize().map_err(|_| Error::ProjectNotFound {
            path: path.to_path_buf(),
        })?;

        if !root.is_dir() {
            return Err(Error::NotADirectory { path: root });
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self { root, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_path_uses_directory_name() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("my-app");
        std::fs::create_dir(&dir).unwrap();

        let project = Project::from_path(&dir).unwrap();
        assert_eq!(project.name, "my-app");
        assert_eq!(project.root, dir.canonicalize().unwrap());
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = Project::from_path(&temp.path().join("nope"));
        assert!(matches!(result, Err(Error::ProjectNotFound { .. })));
    }

    #[test]
    fn test_file_is_not_a_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("main.go");
        std::fs::write(&file, "package main").unwrap();

        let result = Project::from_path(&file);
        assert!(matches!(result, Err(Error::NotADirectory { .. })));
    }
}
