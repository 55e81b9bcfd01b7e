//! Engine configuration with explicit defaults and override merging.
//!
//! [`EngineConfig`] is the typed form of the options the engine consumes at
//! startup. Values come from three layers, applied in order: built-in
//! defaults, an optional JSON config file under the platform config
//! directory, and per-invocation overrides (CLI flags or an embedding
//! host). Validation happens once at the end of the merge; after that the
//! engine trusts the values.
//!
//! Config loading must never take the engine down: a missing or malformed
//! file falls back to defaults with a diagnostic, because a status-line
//! helper that refuses to start over a stale config file is worse than one
//! running with defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::dirs::get_config_directory;
use crate::core::error::{Result, StatuslineError};

/// Floor applied to the fetch interval when auto-fetch is enabled.
pub const MIN_FETCH_INTERVAL_MS: u64 = 1000;

/// Default fetch interval.
pub const DEFAULT_FETCH_INTERVAL_MS: u64 = 30_000;

/// Default deadline for one status invocation.
pub const DEFAULT_STATUS_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Interval between background `git fetch` runs, `None` to disable.
    pub auto_fetch_interval_ms: Option<u64>,
    /// Deadline for one status invocation.
    pub status_timeout_ms: u64,
    /// Emit verbose poll lifecycle diagnostics.
    pub debug_logging: bool,
    /// Working directory override, `None` = inherit the process cwd.
    /// Not persisted; it is a per-invocation concern.
    #[serde(skip)]
    pub workdir: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_fetch_interval_ms: Some(DEFAULT_FETCH_INTERVAL_MS),
            status_timeout_ms: DEFAULT_STATUS_TIMEOUT_MS,
            debug_logging: false,
            workdir: None,
        }
    }
}

/// Per-invocation overrides applied on top of file/default values.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub auto_fetch_interval_ms: Option<u64>,
    pub disable_auto_fetch: bool,
    pub status_timeout_ms: Option<u64>,
    pub debug_logging: Option<bool>,
    pub workdir: Option<PathBuf>,
}

impl EngineConfig {
    /// Load the config file if one exists, falling back to defaults on any
    /// read or parse problem.
    pub fn load_or_default() -> Self {
        let Ok(config_dir) = get_config_directory() else {
            return Self::default();
        };
        let config_file = config_dir.join("config.json");
        if !config_file.exists() {
            return Self::default();
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring config file: {e}");
                Self::default()
            }
        }
    }

    /// Read and parse a specific config file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or does not parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StatuslineError::config_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| StatuslineError::config_parse_failed(path, e))
    }

    /// Apply overrides, then clamp and normalize the result.
    pub fn merged_with(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(interval) = overrides.auto_fetch_interval_ms {
            self.auto_fetch_interval_ms = Some(interval);
        }
        if overrides.disable_auto_fetch {
            self.auto_fetch_interval_ms = None;
        }
        if let Some(timeout) = overrides.status_timeout_ms {
            self.status_timeout_ms = timeout;
        }
        if let Some(debug) = overrides.debug_logging {
            self.debug_logging = debug;
        }
        if overrides.workdir.is_some() {
            self.workdir = overrides.workdir;
        }
        self.validated()
    }

    /// Normalize raw values: a zero interval means disabled, enabled
    /// intervals are clamped to the minimum.
    pub fn validated(mut self) -> Self {
        self.auto_fetch_interval_ms = match self.auto_fetch_interval_ms {
            None | Some(0) => None,
            Some(interval) => Some(interval.max(MIN_FETCH_INTERVAL_MS)),
        };
        self
    }

    /// Fetch interval as a duration, `None` when auto-fetch is disabled.
    pub fn fetch_interval(&self) -> Option<Duration> {
        self.auto_fetch_interval_ms.map(Duration::from_millis)
    }

    /// Status invocation deadline as a duration.
    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }
}
