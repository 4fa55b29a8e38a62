//! Error types for codewalk

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using codewalk's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Codewalk error types
///
/// Only failures that stop work before it begins are surfaced here. Per-file
/// problems during indexing and tracing are logged and skipped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Project not found: {path}")]
    ProjectNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
