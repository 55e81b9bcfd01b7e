//! The status polling engine: debouncing, cool-down and scheduling.
//!
//! This module is the concurrency core of the crate. All engine state (the
//! busy flag, the discovered metadata path, the watch subscription, the
//! shared snapshot store) is owned by a single event-loop task; external
//! handles talk to it exclusively through an event channel, so every state
//! mutation happens on one logical thread and the only hazard is
//! reentrancy, never a data race.
//!
//! # Public API
//! - [`StatusEngine`]: Cloneable handle exposing the trigger operations and
//!   the non-blocking snapshot accessor
//! - [`EngineEvent`]: Events understood by the engine loop
//! - [`COOL_DOWN`]: Fixed post-poll quiet period
//!
//! # Debounce Contract
//! At most one status invocation is in flight. A refresh request while the
//! engine is busy is dropped, not queued; the busy flag stays up through a
//! fixed cool-down after each completion. The cool-down is a hard throttle
//! rather than a sliding debounce: the status command writes lock files
//! into the metadata directory, so every poll wakes the directory watcher,
//! and a window that re-armed on each trigger would never close.
//!
//! # Failure Policy
//! Nothing here propagates a failure to the caller. A timed-out poll keeps
//! the previous snapshot, a failed or unlaunchable poll clears it, a failed
//! fetch is ignored. Failures surface only as `log` diagnostics.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::config::EngineConfig;
use crate::core::parser::StatusParser;
use crate::core::runner::{
    GitRunner, ProcessRunner, RunOutput, FETCH_ARGS, GIT_DIR_ARGS, GIT_PROGRAM, STATUS_ARGS,
};
use crate::core::snapshot::Snapshot;
use crate::core::store::SnapshotStore;
use crate::core::watcher::MetadataWatcher;

/// Quiet period after each status poll completion during which refresh
/// requests are dropped.
pub const COOL_DOWN: Duration = Duration::from_millis(1000);

/// Events processed by the engine loop.
///
/// The first three are the external trigger surface; the rest are
/// completion signals sent back to the loop by its own spawned tasks.
#[derive(Debug)]
pub enum EngineEvent {
    /// An external trigger asked for a status refresh.
    RefreshRequested,
    /// An external trigger asked for a background fetch.
    FetchRequested,
    /// The host's working directory changed; rediscover and rewatch.
    WorkingDirChanged,
    /// The watched metadata directory reported a change.
    MetadataChanged,
    /// A status invocation finished; `None` means it could not be launched.
    StatusFinished(Option<RunOutput>),
    /// A fetch invocation finished with or without success.
    FetchFinished(bool),
    /// Metadata-directory discovery finished; `None` means not a repository.
    DiscoveryFinished(Option<PathBuf>),
    /// The post-poll cool-down window elapsed.
    CooldownElapsed,
}

/// Handle to a running status engine.
///
/// Cloneable and cheap; all methods are non-blocking and safe to call from
/// any host lifecycle event. The engine task itself lives for the rest of
/// the process; dropping handles merely stops the triggers, and the only
/// resource worth releasing (the watch subscription) dies with the process.
#[derive(Clone)]
pub struct StatusEngine {
    events: UnboundedSender<EngineEvent>,
    store: Arc<SnapshotStore>,
}

impl StatusEngine {
    /// Spawn an engine over the real git runner.
    pub fn spawn(config: EngineConfig) -> Self {
        Self::spawn_with_runner(config, Arc::new(GitRunner))
    }

    /// Spawn an engine over a caller-supplied runner.
    pub fn spawn_with_runner(config: EngineConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        let (engine_loop, rx) = EngineLoop::new(config, runner);
        let events = engine_loop.events.clone();
        let store = Arc::clone(&engine_loop.store);
        tokio::spawn(engine_loop.run(rx));
        Self { events, store }
    }

    /// Ask for a status refresh. Dropped if a poll is in flight or cooling
    /// down; never blocks.
    pub fn request_status_refresh(&self) {
        self.send(EngineEvent::RefreshRequested);
    }

    /// Ask for a background fetch. Its success will itself request a
    /// status refresh.
    pub fn request_fetch(&self) {
        self.send(EngineEvent::FetchRequested);
    }

    /// Notify the engine that the working directory changed so it can
    /// rediscover the metadata directory and re-establish its watch.
    pub fn on_working_directory_changed(&self) {
        self.send(EngineEvent::WorkingDirChanged);
    }

    /// Read the latest snapshot without blocking.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.store.current()
    }

    /// Shared handle to the snapshot store for consumers that outlive or
    /// sit apart from this engine handle.
    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    fn send(&self, event: EngineEvent) {
        // A send can only fail after the loop task is gone; at that point
        // triggers are meaningless, not errors.
        let _ = self.events.send(event);
    }
}

/// Owner of all mutable engine state, driven by one event at a time.
struct EngineLoop {
    config: EngineConfig,
    runner: Arc<dyn ProcessRunner>,
    store: Arc<SnapshotStore>,
    events: UnboundedSender<EngineEvent>,
    busy: bool,
    metadata_path: Option<PathBuf>,
    watch: Option<MetadataWatcher>,
}

impl EngineLoop {
    fn new(
        config: EngineConfig,
        runner: Arc<dyn ProcessRunner>,
    ) -> (Self, UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine_loop = Self {
            config,
            runner,
            store: Arc::new(SnapshotStore::new()),
            events: tx,
            busy: false,
            metadata_path: None,
            watch: None,
        };
        (engine_loop, rx)
    }

    async fn run(mut self, mut rx: UnboundedReceiver<EngineEvent>) {
        let mut fetch_timer = self.config.fetch_interval().map(|period| {
            // Skip the immediate first tick; startup polling is the
            // caller's wiring, the timer only covers steady state.
            tokio::time::interval_at(tokio::time::Instant::now() + period, period)
        });

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
                _ = Self::next_tick(&mut fetch_timer) => {
                    self.handle(EngineEvent::FetchRequested);
                }
            }
        }
    }

    async fn next_tick(timer: &mut Option<tokio::time::Interval>) {
        match timer {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }

    fn handle(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::RefreshRequested | EngineEvent::MetadataChanged => {
                self.start_status_poll();
            }
            EngineEvent::StatusFinished(outcome) => self.finish_status_poll(outcome),
            EngineEvent::CooldownElapsed => {
                debug!("cool-down elapsed");
                self.busy = false;
            }
            EngineEvent::FetchRequested => self.start_fetch(),
            EngineEvent::FetchFinished(success) => {
                if success {
                    debug!("fetch succeeded, requesting status refresh");
                    self.start_status_poll();
                } else {
                    debug!("fetch failed, ignoring");
                }
            }
            EngineEvent::WorkingDirChanged => self.start_discovery(),
            EngineEvent::DiscoveryFinished(path) => self.finish_discovery(path),
        }
    }

    fn start_status_poll(&mut self) {
        if self.busy {
            debug!("status poll in flight or cooling down, request dropped");
            return;
        }
        self.busy = true;
        debug!("starting status poll");

        let runner = Arc::clone(&self.runner);
        let events = self.events.clone();
        let cwd = self.config.workdir.clone();
        let timeout = self.config.status_timeout();
        tokio::spawn(async move {
            let outcome = match runner
                .run(GIT_PROGRAM, STATUS_ARGS, cwd.as_deref(), Some(timeout))
                .await
            {
                Ok(output) => Some(output),
                Err(e) => {
                    warn!("could not launch status command: {e}");
                    None
                }
            };
            let _ = events.send(EngineEvent::StatusFinished(outcome));
        });
    }

    fn finish_status_poll(&mut self, outcome: Option<RunOutput>) {
        match outcome {
            Some(output) if output.timed_out => {
                debug!("status poll timed out, keeping last snapshot");
            }
            Some(output) if output.success() => {
                let snapshot = StatusParser::parse(&output.stdout);
                debug!(
                    "status poll ok: branch '{}', {} staged, {} modified, {} untracked",
                    snapshot.branch, snapshot.staged, snapshot.modified, snapshot.untracked
                );
                self.store.replace(snapshot);
            }
            // Non-zero exit or launch failure: the status command says
            // this is not a repository.
            _ => {
                debug!("status poll reported a non-repository, snapshot cleared");
                self.store.clear();
            }
        }

        // The poll itself touched the metadata directory, which will wake
        // the watcher; stay busy for the fixed window so that wake-up
        // cannot re-trigger an endless poll loop.
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(COOL_DOWN).await;
            let _ = events.send(EngineEvent::CooldownElapsed);
        });
    }

    fn start_fetch(&self) {
        debug!("starting fetch");
        let runner = Arc::clone(&self.runner);
        let events = self.events.clone();
        let cwd = self.config.workdir.clone();
        tokio::spawn(async move {
            let success = match runner.run(GIT_PROGRAM, FETCH_ARGS, cwd.as_deref(), None).await {
                Ok(output) => output.success(),
                Err(e) => {
                    debug!("could not launch fetch: {e}");
                    false
                }
            };
            let _ = events.send(EngineEvent::FetchFinished(success));
        });
    }

    fn start_discovery(&mut self) {
        // Release the previous subscription before anything else so a
        // failed discovery cannot leave a watch on the old directory.
        self.watch = None;
        self.metadata_path = None;
        debug!("discovering metadata directory");

        let runner = Arc::clone(&self.runner);
        let events = self.events.clone();
        let cwd = self.config.workdir.clone();
        tokio::spawn(async move {
            let path = match runner
                .run(GIT_PROGRAM, GIT_DIR_ARGS, cwd.as_deref(), None)
                .await
            {
                Ok(output) if output.success() => {
                    let raw = output.stdout.trim();
                    if raw.is_empty() {
                        None
                    } else {
                        Some(resolve_metadata_path(PathBuf::from(raw), cwd))
                    }
                }
                Ok(_) => None,
                Err(e) => {
                    warn!("could not launch metadata discovery: {e}");
                    None
                }
            };
            let _ = events.send(EngineEvent::DiscoveryFinished(path));
        });
    }

    fn finish_discovery(&mut self, path: Option<PathBuf>) {
        match path {
            Some(path) => {
                let events = self.events.clone();
                match MetadataWatcher::subscribe(&path, move || {
                    let _ = events.send(EngineEvent::MetadataChanged);
                }) {
                    Ok(watch) => self.watch = Some(watch),
                    Err(e) => warn!("could not watch {}: {e}", path.display()),
                }
                self.metadata_path = Some(path);
                // The cached snapshot describes the previous directory;
                // refresh it right away.
                self.start_status_poll();
            }
            None => {
                debug!("no repository here, snapshot cleared");
                self.store.clear();
            }
        }
    }
}

/// `rev-parse --git-dir` answers relative to the queried working
/// directory (usually just `.git`); anchor it so the watch subscription
/// does not depend on the process cwd staying put.
fn resolve_metadata_path(path: PathBuf, cwd: Option<PathBuf>) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match cwd.or_else(|| std::env::current_dir().ok()) {
        Some(base) => base.join(path),
        None => path,
    }
}
