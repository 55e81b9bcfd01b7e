//! Shared holder for the latest status snapshot.
//!
//! [`SnapshotStore`] is the single hand-off point between the engine and
//! its consumers: the engine replaces or clears the contents on each poll
//! completion, and renderers read the latest value on every redraw without
//! ever waiting on the engine.

use std::sync::RwLock;

use crate::core::snapshot::Snapshot;

/// Process-wide holder of the most recent successfully parsed snapshot.
///
/// `None` means "not a repository" or "never successfully polled". Shared
/// between the engine loop (sole writer) and any number of readers via
/// `Arc`.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    inner: RwLock<Option<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the current snapshot, if any. Never blocks on the engine; the
    /// lock is only held for the clone.
    pub fn current(&self) -> Option<Snapshot> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the stored snapshot wholesale.
    pub fn replace(&self, snapshot: Snapshot) {
        match self.inner.write() {
            Ok(mut guard) => *guard = Some(snapshot),
            Err(poisoned) => *poisoned.into_inner() = Some(snapshot),
        }
    }

    /// Clear the stored snapshot (confirmed non-repository).
    pub fn clear(&self) {
        match self.inner.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}
