//! Minimal one-line summary rendering.
//!
//! This is a deliberately small consumer of the engine's snapshot, standing
//! in for a host status-line renderer: branch (or short commit when
//! detached), ahead/behind arrows, then one symbol-count pair per non-zero
//! counter. Colors come from `colored`, which suppresses escape codes when
//! stdout is not a terminal.

use colored::*;

use crate::core::Snapshot;

/// Render a snapshot as a single status-line string.
pub fn format_status_line(snapshot: &Snapshot) -> String {
    let mut sections: Vec<String> = Vec::new();

    let head = if !snapshot.branch.is_empty() {
        snapshot.branch.clone()
    } else if !snapshot.commit.is_empty() {
        format!("({})", snapshot.commit)
    } else {
        "(no branch)".to_string()
    };
    sections.push(head.cyan().bold().to_string());

    if snapshot.ahead > 0 {
        sections.push(format!("↑{}", snapshot.ahead).green().to_string());
    }
    if snapshot.behind > 0 {
        sections.push(format!("↓{}", snapshot.behind).red().to_string());
    }
    if snapshot.stashed > 0 {
        sections.push(format!("⚑{}", snapshot.stashed).blue().to_string());
    }
    if snapshot.staged > 0 {
        sections.push(format!("+{}", snapshot.staged).green().to_string());
    }
    if snapshot.modified > 0 {
        sections.push(format!("~{}", snapshot.modified).yellow().to_string());
    }
    if snapshot.deleted > 0 {
        sections.push(format!("-{}", snapshot.deleted).red().to_string());
    }
    if snapshot.renamed > 0 {
        sections.push(format!("»{}", snapshot.renamed).yellow().to_string());
    }
    if snapshot.conflicted > 0 {
        sections.push(format!("!{}", snapshot.conflicted).red().to_string());
    }
    if snapshot.untracked > 0 {
        sections.push(format!("?{}", snapshot.untracked).bright_black().to_string());
    }
    if snapshot.up_to_date_and_clean() {
        sections.push("✓".green().to_string());
    }

    sections.join(" ")
}
