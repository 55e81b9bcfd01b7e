//! Core functionality for the git-statusline engine.
//!
//! This module provides the building blocks of the status-polling engine:
//! the porcelain parser, the process runner, the debouncing engine loop,
//! the metadata-directory watcher and the shared snapshot store.

pub mod config;
pub mod dirs;
pub mod engine;
pub mod error;
pub mod parser;
pub mod runner;
pub mod snapshot;
pub mod store;
pub mod watcher;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, StatuslineError};

// === Status data ===
// The immutable poll result and its shared holder
pub use snapshot::Snapshot;
pub use store::SnapshotStore;

// === Status parsing ===
// Pure porcelain v2 parser: raw text in, snapshot out
pub use parser::StatusParser;

// === Process execution ===
// Runner seam for launching git with timeouts, plus the fixed argument sets
pub use runner::{
    GitRunner, ProcessRunner, RunOutput, FETCH_ARGS, GIT_DIR_ARGS, GIT_PROGRAM, STATUS_ARGS,
};

// === Engine ===
// The debouncing event loop and its external handle
pub use engine::{EngineEvent, StatusEngine, COOL_DOWN};

// === Metadata watching ===
// Filesystem subscription on the discovered .git directory
pub use watcher::MetadataWatcher;

// === Configuration ===
// Typed options with defaults, file loading and override merging
pub use config::{ConfigOverrides, EngineConfig, MIN_FETCH_INTERVAL_MS};
