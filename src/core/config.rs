//! Configuration management

use crate::core::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub index: IndexConfig,
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Files larger than this are dropped from the index (bytes)
    pub max_file_size: u64,
    /// Content is only loaded for files smaller than this (bytes)
    pub max_content_size: u64,
    /// Number of leading lines kept as a file preview
    pub preview_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Glob patterns a file must match to be indexed (empty = everything)
    pub include: Vec<String>,
    /// Glob patterns that always exclude a file
    pub exclude: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_content_size: MAX_CONTENT_SIZE,
            preview_lines: PREVIEW_LINES,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include: vec![],
            exclude: vec![
                "node_modules/**".to_string(),
                "**/node_modules/**".to_string(),
                "dist/**".to_string(),
                "build/**".to_string(),
                "target/**".to_string(),
                "**/__pycache__/**".to_string(),
                "*.min.js".to_string(),
                "*.map".to_string(),
                "*.lock".to_string(),
            ],
        }
    }
}

impl FilterConfig {
    /// Extend the configured filters with extra patterns (e.g. from the CLI)
    pub fn with_extra(mut self, include: &[String], exclude: &[String]) -> Self {
        self.include.extend(include.iter().cloned());
        self.exclude.extend(exclude.iter().cloned());
        self
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.index.max_content_size > config.index.max_file_size {
            return Err(Error::ConfigError {
                message: format!(
                    "max_content_size ({}) must not exceed max_file_size ({})",
                    config.index.max_content_size, config.index.max_file_size
                ),
            });
        }
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = Self::codewalk_home()?;
        Ok(home.join("config.toml"))
    }

    /// Get the codewalk home directory
    pub fn codewalk_home() -> Result<PathBuf> {
        // Check CODEWALK_HOME env var first
        if let Ok(home) = std::env::var("CODEWALK_HOME") {
            return Ok(PathBuf::from(home));
        }

        // Use XDG directories
        ProjectDirs::from("dev", "codewalk", "codewalk")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine codewalk home directory".to_string(),
            })
    }
}

pub const MAX_FILE_SIZE: u64 = 1_048_576; // 1MB
pub const MAX_CONTENT_SIZE: u64 = 262_144; // 256KB
pub const PREVIEW_LINES: usize = 10;
