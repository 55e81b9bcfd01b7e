//! Parsing of `git status --porcelain=v2` output.
//!
//! This module provides [`StatusParser`] which maps the raw machine-readable
//! status output to a [`Snapshot`]. It is a pure function over the input
//! text: no I/O, no state, and parsing the same input twice yields identical
//! snapshots.
//!
//! # Public API
//! - [`StatusParser`]: Static parser for porcelain v2 status output
//!
//! # Recognized Lines
//! - **Headers** (`# branch.oid`, `# branch.head`, `# branch.upstream`,
//!   `# branch.ab`, `# stash`): branch metadata, ahead/behind, stash count
//! - **Ordinary entries** (`1 XY ...`): index and worktree state counters
//! - **Rename/copy entries** (`2 ...`): renamed counter
//! - **Unmerged entries** (`u ...`): conflicted counter
//! - **Untracked entries** (`? ...`): untracked counter
//!
//! Unknown or malformed lines are skipped so newer git versions can add
//! entry kinds without breaking the parse, and unparseable numeric tokens
//! fall back to 0 instead of failing the whole snapshot.

use crate::core::snapshot::Snapshot;

/// Length of the shortened commit id kept in a snapshot.
const SHORT_COMMIT_LEN: usize = 6;

pub struct StatusParser;

impl StatusParser {
    /// Parse raw porcelain v2 status output into a snapshot.
    pub fn parse(raw: &str) -> Snapshot {
        let mut snap = Snapshot::default();

        for line in raw.lines() {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("#") => Self::parse_header(&mut snap, &mut tokens),
                Some("1") => Self::parse_changed_entry(&mut snap, tokens.next()),
                Some("2") => snap.renamed += 1,
                Some("u") => snap.conflicted += 1,
                Some("?") => snap.untracked += 1,
                // Ignored entries ("!"), blank lines and unknown kinds.
                _ => {}
            }
        }

        snap
    }

    /// Handle a `# <key> <values...>` header line.
    fn parse_header<'a>(snap: &mut Snapshot, tokens: &mut impl Iterator<Item = &'a str>) {
        match tokens.next() {
            Some("branch.oid") => {
                snap.commit = match tokens.next() {
                    // An unborn branch has no commit to abbreviate.
                    Some("(initial)") | None => String::new(),
                    Some(oid) => oid.chars().take(SHORT_COMMIT_LEN).collect(),
                };
            }
            Some("branch.head") => {
                snap.branch = match tokens.next() {
                    Some("(detached)") | None => String::new(),
                    Some(name) => name.to_string(),
                };
            }
            Some("branch.upstream") => {
                snap.upstream_branch = tokens.next().unwrap_or_default().to_string();
            }
            Some("branch.ab") => {
                snap.ahead = Self::parse_offset_token(tokens.next());
                snap.behind = Self::parse_offset_token(tokens.next());
            }
            Some("stash") => {
                snap.stashed = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
            }
            _ => {}
        }
    }

    /// Handle the `XY` code of an ordinary changed entry (`1 XY ...`).
    fn parse_changed_entry(snap: &mut Snapshot, xy: Option<&str>) {
        let mut chars = xy.unwrap_or_default().chars();
        let index_state = chars.next();
        let worktree_state = chars.next();

        if let Some(x) = index_state {
            if x != '.' {
                snap.staged += 1;
            }
            match x {
                'A' => snap.staged_added += 1,
                'D' => snap.staged_deleted += 1,
                'M' => snap.staged_modified += 1,
                'R' => snap.staged_renamed += 1,
                _ => {}
            }
        }

        match worktree_state {
            Some('M') | Some('T') => snap.modified += 1,
            Some('D') => snap.deleted += 1,
            _ => {}
        }
    }

    /// Parse a signed ahead/behind token like `+2` or `-3` into its
    /// magnitude, defaulting to 0 when the token is missing or malformed.
    fn parse_offset_token(token: Option<&str>) -> u32 {
        token
            .and_then(|t| t.get(1..))
            .and_then(|t| t.parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branch_headers() {
        let raw = "\
# branch.oid 4ae2bf5bc95ee1971b1ea4ba620dd08b1b0eb7bb
# branch.head main
# branch.upstream origin/main
# branch.ab +2 -3
";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.commit, "4ae2bf");
        assert_eq!(snap.branch, "main");
        assert_eq!(snap.upstream_branch, "origin/main");
        assert_eq!(snap.ahead, 2);
        assert_eq!(snap.behind, 3);
    }

    #[test]
    fn test_ahead_behind_without_changes_is_not_dirty() {
        let snap = StatusParser::parse("# branch.ab +2 -3\n");
        assert_eq!(snap.ahead, 2);
        assert_eq!(snap.behind, 3);
        assert!(!snap.up_to_date());
        assert!(!snap.is_dirty());
    }

    #[test]
    fn test_worktree_modified_entry() {
        let raw = "1 .M N... 100644 100644 100644 aaaa bbbb file.txt\n";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.staged, 0);
        assert_eq!(snap.modified, 1);
        assert!(snap.is_dirty());
    }

    #[test]
    fn test_staged_added_entry() {
        let raw = "1 A. N... 000000 100644 100644 0000 bbbb new.txt\n";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.staged, 1);
        assert_eq!(snap.staged_added, 1);
        assert_eq!(snap.modified, 0);
        assert!(!snap.is_dirty());
    }

    #[test]
    fn test_untracked_entry() {
        let snap = StatusParser::parse("? scratch.txt\n");
        assert_eq!(snap.untracked, 1);
        assert!(snap.is_dirty());
    }

    #[test]
    fn test_index_state_classification() {
        let raw = "\
1 A. N... 000000 100644 100644 0000 aaaa added.txt
1 D. N... 100644 000000 000000 aaaa 0000 gone.txt
1 M. N... 100644 100644 100644 aaaa bbbb changed.txt
1 R. N... 100644 100644 100644 aaaa bbbb moved.txt
";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.staged, 4);
        assert_eq!(snap.staged_added, 1);
        assert_eq!(snap.staged_deleted, 1);
        assert_eq!(snap.staged_modified, 1);
        assert_eq!(snap.staged_renamed, 1);
    }

    #[test]
    fn test_worktree_state_classification() {
        let raw = "\
1 .M N... 100644 100644 100644 aaaa aaaa modified.txt
1 .T N... 100644 100644 100644 aaaa aaaa typechange.txt
1 .D N... 100644 100644 000000 aaaa aaaa deleted.txt
";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.modified, 2);
        assert_eq!(snap.deleted, 1);
        assert_eq!(snap.staged, 0);
    }

    #[test]
    fn test_staged_and_modified_same_entry() {
        // Index modified and worktree modified on the same path count once
        // in each dimension.
        let raw = "1 MM N... 100644 100644 100644 aaaa bbbb both.txt\n";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.staged, 1);
        assert_eq!(snap.staged_modified, 1);
        assert_eq!(snap.modified, 1);
    }

    #[test]
    fn test_rename_unmerged_and_ignored_entries() {
        let raw = "\
2 R. N... 100644 100644 100644 aaaa bbbb R100 new.txt\told.txt
u UU N... 100644 100644 100644 100644 aaaa bbbb cccc conflict.txt
! target/
";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.renamed, 1);
        assert_eq!(snap.conflicted, 1);
        assert_eq!(snap.untracked, 0);
    }

    #[test]
    fn test_stash_header() {
        let snap = StatusParser::parse("# stash 2\n");
        assert_eq!(snap.stashed, 2);
    }

    #[test]
    fn test_unborn_and_detached_markers_map_to_empty() {
        let raw = "\
# branch.oid (initial)
# branch.head (detached)
";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.commit, "");
        assert_eq!(snap.branch, "");
        assert_eq!(snap.upstream_branch, "");
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        let raw = "\
# branch.ab +x -y
# stash lots
";
        let snap = StatusParser::parse(raw);
        assert_eq!(snap.ahead, 0);
        assert_eq!(snap.behind, 0);
        assert_eq!(snap.stashed, 0);
    }

    #[test]
    fn test_unknown_and_truncated_lines_are_ignored() {
        let raw = "\
# branch.head main
z something-from-a-future-git
1
# branch.unknown value
garbage
";
        let snap = StatusParser::parse(raw);
        assert_eq!(
            snap,
            Snapshot {
                branch: "main".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_empty_input_and_trailing_newline() {
        assert_eq!(StatusParser::parse(""), Snapshot::default());
        assert_eq!(
            StatusParser::parse("? a.txt\n"),
            StatusParser::parse("? a.txt")
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = "\
# branch.oid 4ae2bf5bc95ee1971b1ea4ba620dd08b1b0eb7bb
# branch.head main
# branch.ab +1 -0
1 MM N... 100644 100644 100644 aaaa bbbb both.txt
? scratch.txt
";
        assert_eq!(StatusParser::parse(raw), StatusParser::parse(raw));
    }

    #[test]
    fn test_counters_match_generated_inputs() {
        // Build inputs from known entry counts and check every counter and
        // derived summary against what went in.
        for staged_added in 0..3u32 {
            for modified in 0..3u32 {
                for untracked in 0..3u32 {
                    let mut raw = String::from("# branch.head work\n");
                    for i in 0..staged_added {
                        raw.push_str(&format!(
                            "1 A. N... 000000 100644 100644 0000 aaaa new{i}.txt\n"
                        ));
                    }
                    for i in 0..modified {
                        raw.push_str(&format!(
                            "1 .M N... 100644 100644 100644 aaaa bbbb mod{i}.txt\n"
                        ));
                    }
                    for i in 0..untracked {
                        raw.push_str(&format!("? new{i}.txt\n"));
                    }

                    let snap = StatusParser::parse(&raw);
                    assert_eq!(snap.staged, staged_added);
                    assert_eq!(snap.staged_added, staged_added);
                    assert_eq!(snap.modified, modified);
                    assert_eq!(snap.untracked, untracked);
                    assert_eq!(snap.is_dirty(), modified > 0 || untracked > 0);
                    assert_eq!(
                        snap.up_to_date_and_clean(),
                        snap.up_to_date() && !snap.is_dirty()
                    );
                }
            }
        }
    }
}
