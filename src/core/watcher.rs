//! Filesystem watching of the repository metadata directory.
//!
//! [`MetadataWatcher`] subscribes to change notifications on the discovered
//! `.git` directory and fires a caller-supplied trigger on every relevant
//! event. It deliberately does nothing else: classifying the change and
//! deciding whether a poll actually happens is the engine's job, which also
//! throttles the feedback loop caused by the status command itself writing
//! into the watched directory.

use std::path::Path;

use log::{debug, warn};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::core::error::Result;

/// Active watch subscription on a repository metadata directory.
///
/// Exclusively owned by the engine; at most one is alive at a time and the
/// previous one is always dropped before a replacement is created.
pub struct MetadataWatcher {
    /// Handle to the underlying `notify` watcher. Never read directly, but
    /// it must be kept alive: dropping the `RecommendedWatcher` deregisters
    /// the OS file-watch and stops all event delivery.
    _watcher: RecommendedWatcher,
}

impl MetadataWatcher {
    /// Subscribe to changes under `path`, invoking `on_change` on every
    /// relevant create/modify/remove/rename event.
    ///
    /// The watch is non-recursive: the metadata directory's own entries
    /// (HEAD, index, refs lock files) change on every operation worth a
    /// refresh, so there is no need to walk its subtree.
    ///
    /// # Errors
    ///
    /// Returns an error when the OS watch cannot be established.
    pub fn subscribe<F>(path: &Path, on_change: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| match res {
                Ok(event) if is_relevant(&event.kind) => on_change(),
                Ok(_) => {}
                Err(e) => warn!("filesystem watcher error: {e}"),
            },
            Config::default(),
        )?;
        watcher.watch(path, RecursiveMode::NonRecursive)?;
        debug!("watching metadata directory {}", path.display());

        Ok(Self { _watcher: watcher })
    }
}

/// Only content- or name-affecting events warrant a refresh; pure access
/// notifications are noise.
fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[test]
    fn test_subscribe_fires_on_file_change() {
        let dir = tempfile::tempdir().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let _watch = MetadataWatcher::subscribe(dir.path(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        std::fs::write(dir.path().join("HEAD"), "ref: refs/heads/main\n").unwrap();

        // Native watch backends deliver asynchronously.
        let deadline = Instant::now() + Duration::from_secs(5);
        while hits.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(hits.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_dropping_the_watcher_stops_delivery() {
        let dir = tempfile::tempdir().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let watch = MetadataWatcher::subscribe(dir.path(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        drop(watch);

        std::fs::write(dir.path().join("index"), "contents").unwrap();
        std::thread::sleep(Duration::from_millis(200));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(MetadataWatcher::subscribe(&missing, || {}).is_err());
    }

    #[test]
    fn test_access_events_are_filtered() {
        assert!(!is_relevant(&EventKind::Access(
            notify::event::AccessKind::Read
        )));
        assert!(is_relevant(&EventKind::Modify(
            notify::event::ModifyKind::Any
        )));
    }
}
