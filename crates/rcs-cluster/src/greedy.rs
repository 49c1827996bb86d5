// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Sequential greedy grouping
//!
//! Revisions are walked in time order. Each one joins the open commit unless
//! it starts a new one: a different author, a file already in the commit, a
//! long idle gap, or a moderate gap where the message and the revision number
//! both differ from the previous revision.

use std::fmt;

use chrono::TimeDelta;
use rcs_log::FileLog;
use tracing::{debug, info};

use crate::commit::{Commit, CommitBuilder};
use crate::event::{RevisionEvent, flatten};
use crate::saturating_seconds;

/// Default gap under which same-author revisions always merge
pub const DEFAULT_SMALL_GAP_SECS: i64 = 10;

/// Default gap over which revisions never merge
pub const DEFAULT_BIG_GAP_SECS: i64 = 3600;

/// Gap thresholds for greedy grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapOptions {
    /// Gaps above this split unless the message or revision number repeats
    pub small_gap: TimeDelta,
    /// Gaps above this always split
    pub big_gap: TimeDelta,
}

impl GapOptions {
    /// Create options from gaps in whole seconds
    ///
    /// Gaps beyond [`MAX_DURATION_SECS`](crate::MAX_DURATION_SECS) saturate.
    #[must_use]
    pub fn from_secs(small_gap: i64, big_gap: i64) -> Self {
        Self {
            small_gap: saturating_seconds(small_gap),
            big_gap: saturating_seconds(big_gap),
        }
    }

    /// Replace the small gap
    #[must_use]
    pub fn with_small_gap(mut self, small_gap: TimeDelta) -> Self {
        self.small_gap = small_gap;
        self
    }

    /// Replace the big gap
    #[must_use]
    pub fn with_big_gap(mut self, big_gap: TimeDelta) -> Self {
        self.big_gap = big_gap;
        self
    }
}

impl Default for GapOptions {
    fn default() -> Self {
        Self::from_secs(DEFAULT_SMALL_GAP_SECS, DEFAULT_BIG_GAP_SECS)
    }
}

/// Why a revision opened a new commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitReason {
    /// The first revision of the input
    First,
    /// A different author than the open commit
    AuthorChanged,
    /// The working file is already in the open commit
    FileRepeated,
    /// Longer than the big gap since the previous revision
    BigGap,
    /// Longer than the small gap, with a different message and revision number
    UnrelatedChange,
}

impl fmt::Display for SplitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::First => "first",
            Self::AuthorChanged => "author changed",
            Self::FileRepeated => "file repeated",
            Self::BigGap => "big gap",
            Self::UnrelatedChange => "unrelated change",
        };
        f.write_str(reason)
    }
}

/// Decide whether `event` must open a new commit instead of joining `open`
///
/// `open` pairs the open commit with the last revision admitted to it.
fn split_reason(
    open: Option<(&CommitBuilder, &RevisionEvent<'_>)>,
    event: &RevisionEvent<'_>,
    options: &GapOptions,
) -> Option<SplitReason> {
    let Some((commit, previous)) = open else {
        return Some(SplitReason::First);
    };
    let gap = event.timestamp - previous.timestamp;
    if event.author != commit.author() {
        Some(SplitReason::AuthorChanged)
    } else if commit.has_working_file(event.working_file) {
        Some(SplitReason::FileRepeated)
    } else if gap > options.big_gap {
        Some(SplitReason::BigGap)
    } else if gap > options.small_gap
        && event.description != previous.description
        && event.revision != previous.revision
    {
        Some(SplitReason::UnrelatedChange)
    } else {
        None
    }
}

/// Group every revision of `logs` into commits, oldest first
#[must_use]
pub fn cluster(logs: &[FileLog], options: &GapOptions) -> Vec<Commit> {
    let events = flatten(logs);
    let mut commits = Vec::new();
    let mut open: Option<CommitBuilder> = None;
    let mut previous: Option<&RevisionEvent<'_>> = None;

    for event in &events {
        let reason = split_reason(open.as_ref().zip(previous), event, options);

        match (reason, open.as_mut()) {
            (None, Some(builder)) => builder.admit(event),
            (reason, _) => {
                debug!(
                    reason = %reason.unwrap_or(SplitReason::First),
                    file = event.working_file,
                    revision = event.revision,
                    author = event.author,
                    date = event.date,
                    "new commit"
                );
                if let Some(done) = open.take() {
                    commits.push(done.build(None));
                }
                open = Some(CommitBuilder::open(event));
            }
        }
        previous = Some(event);
    }
    if let Some(done) = open {
        commits.push(done.build(None));
    }

    info!(
        revisions = events.len(),
        commits = commits.len(),
        "greedy clustering complete"
    );
    commits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{file_log, rev};
    use similar_asserts::assert_eq;

    fn shape(commits: &[Commit]) -> Vec<Vec<(String, String)>> {
        commits
            .iter()
            .map(|c| {
                c.members
                    .iter()
                    .map(|m| (m.working_file.clone(), m.revision.clone()))
                    .collect()
            })
            .collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(f, r)| (f.to_string(), r.to_string()))
            .collect()
    }

    #[test]
    fn test_three_files_within_small_gap_merge() {
        let logs = vec![
            file_log("a.c", vec![rev("1.2", "alice", 0, "one\n")]),
            file_log("b.c", vec![rev("1.5", "alice", 5, "two\n")]),
            file_log("c.c", vec![rev("1.1", "alice", 8, "three\n")]),
        ];
        let commits = cluster(&logs, &GapOptions::default());
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].len(), 3);
        assert_eq!(commits[0].author, "alice");
        assert_eq!(
            commits[0].messages,
            vec!["a.c: one", "b.c: two", "c.c: three"]
        );
    }

    #[test]
    fn test_same_file_twice_splits_even_within_small_gap() {
        let logs = vec![
            file_log(
                "a.c",
                vec![rev("1.2", "alice", 5, "more\n"), rev("1.1", "alice", 0, "start\n")],
            ),
            file_log("b.c", vec![rev("1.1", "alice", 8, "more\n")]),
        ];
        let commits = cluster(&logs, &GapOptions::default());
        assert_eq!(
            shape(&commits),
            vec![
                pairs(&[("a.c", "1.1")]),
                pairs(&[("a.c", "1.2"), ("b.c", "1.1")]),
            ]
        );
    }

    #[test]
    fn test_author_change_splits_despite_tiny_gap() {
        let logs = vec![
            file_log("a.c", vec![rev("1.1", "alice", 0, "x\n")]),
            file_log("b.c", vec![rev("1.1", "bob", 2, "x\n")]),
        ];
        let commits = cluster(&logs, &GapOptions::default());
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].author, "alice");
        assert_eq!(commits[1].author, "bob");
    }

    #[test]
    fn test_same_file_after_small_gap_splits() {
        let options = GapOptions::default();
        let later = DEFAULT_SMALL_GAP_SECS + 1;
        let logs = vec![file_log(
            "a.c",
            vec![
                rev("1.2", "alice", later, "another change\n"),
                rev("1.1", "alice", 0, "fix bug\n"),
            ],
        )];
        let commits = cluster(&logs, &options);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].messages, vec!["a.c: fix bug"]);
        assert_eq!(commits[1].messages, vec!["a.c: another change"]);
    }

    #[test]
    fn test_big_gap_always_splits() {
        let options = GapOptions::default();
        let logs = vec![
            file_log("a.c", vec![rev("1.1", "alice", 0, "same\n")]),
            file_log(
                "b.c",
                vec![rev("1.1", "alice", DEFAULT_BIG_GAP_SECS + 1, "same\n")],
            ),
        ];
        let commits = cluster(&logs, &options);
        assert_eq!(commits.len(), 2, "same message and revision cannot bridge a big gap");
    }

    #[test]
    fn test_moderate_gap_merges_on_same_message() {
        let logs = vec![
            file_log("a.c", vec![rev("1.4", "alice", 0, "rename API\n")]),
            file_log("b.c", vec![rev("1.9", "alice", 600, "rename API\n")]),
        ];
        let commits = cluster(&logs, &GapOptions::default());
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].messages, vec!["a.c: rename API"]);
    }

    #[test]
    fn test_moderate_gap_merges_on_same_revision_number() {
        let logs = vec![
            file_log("a.c", vec![rev("1.2", "alice", 0, "first\n")]),
            file_log("b.c", vec![rev("1.2", "alice", 600, "second\n")]),
        ];
        let commits = cluster(&logs, &GapOptions::default());
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].len(), 2);
    }

    #[test]
    fn test_moderate_gap_splits_unrelated_work() {
        let logs = vec![
            file_log("a.c", vec![rev("1.2", "alice", 0, "first\n")]),
            file_log("b.c", vec![rev("1.3", "alice", 600, "second\n")]),
        ];
        let commits = cluster(&logs, &GapOptions::default());
        assert_eq!(commits.len(), 2);
    }

    #[test]
    fn test_gap_is_measured_from_last_admitted_revision() {
        // Each step is 8s, under the small gap, so the chain merges even though
        // first and last are 24s apart.
        let logs = vec![
            file_log("a.c", vec![rev("1.1", "alice", 0, "w\n")]),
            file_log("b.c", vec![rev("1.2", "alice", 8, "x\n")]),
            file_log("c.c", vec![rev("1.3", "alice", 16, "y\n")]),
            file_log("d.c", vec![rev("1.4", "alice", 24, "z\n")]),
        ];
        let commits = cluster(&logs, &GapOptions::default());
        assert_eq!(commits.len(), 1);
    }

    #[test]
    fn test_representative_timestamp_is_first_member() {
        let logs = vec![
            file_log("b.c", vec![rev("1.1", "alice", 4, "x\n")]),
            file_log("a.c", vec![rev("1.1", "alice", 1, "x\n")]),
        ];
        let commits = cluster(&logs, &GapOptions::default());
        assert_eq!(commits[0].members[0].working_file, "a.c");
        assert_eq!(commits[0].timestamp, commits[0].members[0].timestamp);
        assert_eq!(commits[0].date, commits[0].members[0].date);
        assert!(commits[0].bucket.is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster(&[], &GapOptions::default()).is_empty());
    }

    #[test]
    fn test_split_reason_classification() {
        let logs = vec![
            file_log("a.c", vec![rev("1.1", "alice", 0, "x\n")]),
            file_log("b.c", vec![rev("1.1", "bob", 1, "x\n")]),
        ];
        let events = flatten(&logs);
        let options = GapOptions::default();
        assert_eq!(
            split_reason(None, &events[0], &options),
            Some(SplitReason::First)
        );

        let open = CommitBuilder::open(&events[0]);
        assert_eq!(
            split_reason(Some((&open, &events[0])), &events[1], &options),
            Some(SplitReason::AuthorChanged)
        );
        assert_eq!(
            split_reason(Some((&open, &events[0])), &events[0], &options),
            Some(SplitReason::FileRepeated)
        );
        assert_eq!(SplitReason::UnrelatedChange.to_string(), "unrelated change");
    }

    #[test]
    fn test_huge_gaps_saturate() {
        let options = GapOptions::from_secs(i64::MAX, i64::MAX);
        assert_eq!(options.big_gap, TimeDelta::MAX);

        let logs = vec![
            file_log("a.c", vec![rev("1.1", "alice", 0, "x\n")]),
            file_log("b.c", vec![rev("1.1", "alice", 86_400, "y\n")]),
        ];
        let commits = cluster(&logs, &options);
        assert_eq!(commits.len(), 1, "no gap exceeds a saturated small gap");
    }

    #[test]
    fn test_gap_options_builders() {
        let options = GapOptions::default()
            .with_small_gap(TimeDelta::seconds(600))
            .with_big_gap(TimeDelta::seconds(7200));
        assert_eq!(options, GapOptions::from_secs(600, 7200));
        assert_eq!(
            GapOptions::default(),
            GapOptions::from_secs(DEFAULT_SMALL_GAP_SECS, DEFAULT_BIG_GAP_SECS)
        );
    }
}
