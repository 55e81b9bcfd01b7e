//! External command execution with bounded timeouts.
//!
//! This module provides the [`ProcessRunner`] trait, the seam between the
//! engine and the outside world. Abstracting process execution keeps the
//! engine testable with scripted outcomes and keeps the git invocation
//! details (argument sets, kill-on-timeout discipline) in one place.
//!
//! # Public API
//! - [`ProcessRunner`]: Async trait for launching a command and capturing
//!   its outcome
//! - [`RunOutput`]: Exit code, timeout marker and captured stdout
//! - [`GitRunner`]: Production implementation over `tokio::process`
//!
//! A non-zero exit code is a normal outcome carried inside [`RunOutput`];
//! only launch failures (missing executable, spawn errors) surface as
//! `Err`, and every call site is expected to catch them.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::core::error::{Result, StatuslineError};

/// Program invoked for every repository query.
pub const GIT_PROGRAM: &str = "git";

/// Argument set for the status poll: machine-readable porcelain v2 with
/// branch headers, a stash summary and untracked files fully enumerated.
pub const STATUS_ARGS: &[&str] = &[
    "status",
    "--porcelain=v2",
    "--branch",
    "--show-stash",
    "--untracked-files=all",
];

/// Argument set for the periodic ahead/behind refresh.
pub const FETCH_ARGS: &[&str] = &["fetch"];

/// Argument set for metadata-directory discovery.
pub const GIT_DIR_ARGS: &[&str] = &["rev-parse", "--git-dir"];

/// Outcome of one completed (or killed) command invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Exit code of the process, `None` when it was killed.
    pub exit_code: Option<i32>,
    /// True when the process exceeded its deadline and was terminated.
    pub timed_out: bool,
    /// Captured standard output as text.
    pub stdout: String,
}

impl RunOutput {
    /// Whether the command ran to completion and exited zero.
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Executes external commands on behalf of the engine.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command with arguments, an optional working directory
    /// (`None` = inherit the current one) and an optional deadline.
    ///
    /// Resolves exactly once per invocation. On timeout the process is
    /// forcibly terminated and the output carries the `timed_out` marker.
    ///
    /// # Errors
    ///
    /// Returns an error only when the command cannot be launched at all.
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        timeout: Option<Duration>,
    ) -> Result<RunOutput>;
}

/// Production runner backed by `tokio::process`.
pub struct GitRunner;

#[async_trait]
impl ProcessRunner for GitRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        timeout: Option<Duration>,
    ) -> Result<RunOutput> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            // Dropping the wait future on timeout must also reap the child.
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let child = command
            .spawn()
            .map_err(|e| StatuslineError::command_launch(program, e))?;

        let wait = child.wait_with_output();
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(output) => Ok(completed(output?)),
                Err(_) => Ok(RunOutput {
                    exit_code: None,
                    timed_out: true,
                    stdout: String::new(),
                }),
            },
            None => Ok(completed(wait.await?)),
        }
    }
}

fn completed(output: std::process::Output) -> RunOutput {
    RunOutput {
        exit_code: output.status.code(),
        timed_out: false,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    }
}
