//! One-shot status poll.
//!
//! Runs the status command a single time through the same runner and
//! parser the engine uses, then prints the rendered line (or the raw
//! snapshot as JSON). Useful for prompt integrations that poll from the
//! shell instead of keeping the engine resident.

use crate::commands::render::format_status_line;
use crate::core::{
    error::{Result, StatuslineError},
    EngineConfig, GitRunner, ProcessRunner, StatusParser, GIT_PROGRAM, STATUS_ARGS,
};

pub async fn execute_once(config: EngineConfig, json: bool) -> Result<()> {
    let output = GitRunner
        .run(
            GIT_PROGRAM,
            STATUS_ARGS,
            config.workdir.as_deref(),
            Some(config.status_timeout()),
        )
        .await?;

    if output.timed_out {
        return Err(StatuslineError::StatusTimedOut);
    }
    if !output.success() {
        return Err(StatuslineError::NotInGitRepo);
    }

    let snapshot = StatusParser::parse(&output.stdout);
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", format_status_line(&snapshot));
    }

    Ok(())
}
