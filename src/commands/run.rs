//! Resident engine mode.
//!
//! Spawns the polling engine, wires the startup triggers and then acts as
//! its simplest possible consumer: read the snapshot store on a fixed
//! cadence and reprint the line whenever the value changed. Hosts with a
//! richer renderer would read the same store from their own redraw cycle
//! instead.

use std::time::Duration;

use crate::commands::render::format_status_line;
use crate::core::{error::Result, EngineConfig, Snapshot, StatusEngine};

/// How often the printed line is reconciled against the store.
const RENDER_INTERVAL: Duration = Duration::from_millis(500);

pub async fn execute_run(config: EngineConfig) -> Result<()> {
    let engine = StatusEngine::spawn(config);
    engine.on_working_directory_changed();
    engine.request_status_refresh();

    let mut last: Option<Option<Snapshot>> = None;
    let mut ticker = tokio::time::interval(RENDER_INTERVAL);
    loop {
        ticker.tick().await;
        let current = engine.snapshot();
        if last.as_ref() != Some(&current) {
            match &current {
                Some(snapshot) => println!("{}", format_status_line(snapshot)),
                None => println!("(not a git repository)"),
            }
            last = Some(current);
        }
    }
}
