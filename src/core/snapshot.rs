//! Parsed repository status data structures.
//!
//! This module defines [`Snapshot`], the immutable value produced by one
//! successful status poll. A snapshot carries branch metadata and per-state
//! file counts; the dirty/up-to-date summaries are methods recomputed from
//! the counters on every call, so they can never drift out of sync with the
//! fields they summarize.
//!
//! # Public API
//! - [`Snapshot`]: Branch metadata plus staged/worktree/untracked counters

use serde::{Deserialize, Serialize};

/// Immutable result of one successful status poll.
///
/// All counter fields are unsigned, so the "every count is non-negative"
/// invariant holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Short identifier of the HEAD commit, empty on an unborn branch.
    pub commit: String,
    /// Local branch name, empty when detached.
    pub branch: String,
    /// Upstream branch name, empty when no upstream is configured.
    pub upstream_branch: String,
    /// Commits ahead of the upstream.
    pub ahead: u32,
    /// Commits behind the upstream.
    pub behind: u32,
    /// Number of stash entries.
    pub stashed: u32,
    /// Index entries with any non-unmodified index state.
    pub staged: u32,
    /// Index entries added (`A`).
    pub staged_added: u32,
    /// Index entries deleted (`D`).
    pub staged_deleted: u32,
    /// Index entries modified (`M`).
    pub staged_modified: u32,
    /// Index entries renamed (`R`).
    pub staged_renamed: u32,
    /// Worktree entries modified or type-changed.
    pub modified: u32,
    /// Worktree entries deleted.
    pub deleted: u32,
    /// Renamed or copied entries.
    pub renamed: u32,
    /// Unmerged (conflicted) entries.
    pub conflicted: u32,
    /// Untracked files.
    pub untracked: u32,
}

impl Snapshot {
    /// Whether the working tree has any local changes.
    pub fn is_dirty(&self) -> bool {
        self.modified > 0 || self.deleted > 0 || self.renamed > 0 || self.untracked > 0
    }

    /// Whether the branch is neither ahead of nor behind its upstream.
    pub fn up_to_date(&self) -> bool {
        self.ahead == 0 && self.behind == 0
    }

    /// Whether the branch is up to date and the working tree is clean.
    pub fn up_to_date_and_clean(&self) -> bool {
        self.up_to_date() && !self.is_dirty()
    }
}
