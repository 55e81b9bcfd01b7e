//! git-statusline - An asynchronous git status polling engine for status-line renderers.
//!
//! This library keeps a cached summary of a git working directory (branch,
//! ahead/behind, staged/modified/conflicted/untracked counts) up to date by
//! polling `git status --porcelain=v2` in the background. Polls are
//! debounced behind a busy flag with a hard cool-down, the repository's
//! `.git` directory is watched for changes, and consumers read the latest
//! [`Snapshot`] from a shared store without ever blocking on git.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - The polling engine and its trigger/read handle
//! - The porcelain v2 status parser
//! - The process-runner seam for supplying scripted outcomes in tests
//! - Configuration loading and merging
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Configuration
    ConfigOverrides,
    EngineConfig,

    // Engine
    EngineEvent,

    GitRunner,
    MetadataWatcher,

    // Process execution
    ProcessRunner,
    Result,
    RunOutput,

    // Status data
    Snapshot,
    SnapshotStore,

    StatusEngine,
    // Error handling
    StatuslineError,

    // Status parsing
    StatusParser,

    COOL_DOWN,
    FETCH_ARGS,
    GIT_DIR_ARGS,
    GIT_PROGRAM,
    MIN_FETCH_INTERVAL_MS,
    STATUS_ARGS,
};
