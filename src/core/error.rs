//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`StatuslineError`] which covers the failure modes of
//! the status engine and its CLI surface. It uses `thiserror` for ergonomic
//! error definitions and includes specialized constructors for common
//! failure scenarios.
//!
//! # Public API
//! - [`StatuslineError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, StatuslineError>`
//!
//! # Error Categories
//! - **Process launch**: git executable missing, spawn errors
//! - **Repository**: status command reported a non-repository
//! - **Configuration**: config directory discovery, file read/parse errors
//! - **Watching**: filesystem watch subscription errors
//!
//! Inside the engine these errors are consumed, never propagated: a poll
//! failure ends in "snapshot unchanged" or "snapshot cleared" plus a
//! diagnostic log line. Errors only escape through the CLI entry points.

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-statusline
#[derive(Error, Debug)]
pub enum StatuslineError {
    // Process invocation errors
    #[error("Failed to launch '{command}': {source}")]
    CommandLaunch {
        command: String,
        source: std::io::Error,
    },

    // Repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Status command timed out")]
    StatusTimedOut,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Filesystem watch errors
    #[error("Filesystem watch error: {0}")]
    Watch(#[from] notify::Error),

    // JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using StatuslineError
pub type Result<T> = std::result::Result<T, StatuslineError>;

impl StatuslineError {
    /// Create a command launch error for a failed spawn
    pub fn command_launch(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandLaunch {
            command: command.into(),
            source,
        }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}
