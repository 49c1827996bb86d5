// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Flattened, time-ordered view of every revision

use chrono::{DateTime, Utc};
use rcs_log::{FileLog, Revision};

/// One revision of one file, borrowed from its [`FileLog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionEvent<'a> {
    /// When the revision was checked in
    pub timestamp: DateTime<Utc>,
    /// Who checked it in
    pub author: &'a str,
    /// Date text as rlog printed it
    pub date: &'a str,
    /// Path of the `,v` file
    pub repository_file: &'a str,
    /// Revision number
    pub revision: &'a str,
    /// Path of the working file
    pub working_file: &'a str,
    /// Log message
    pub description: &'a str,
}

impl<'a> RevisionEvent<'a> {
    /// Build the event for `revision` of `log`
    #[must_use]
    pub fn new(log: &'a FileLog, revision: &'a Revision) -> Self {
        Self {
            timestamp: revision.timestamp,
            author: &revision.author,
            date: &revision.date,
            repository_file: &log.repository_file,
            revision: &revision.revision,
            working_file: &log.working_file,
            description: &revision.description,
        }
    }
}

/// Every revision of every file, sorted by timestamp
///
/// The sort is stable: revisions with equal timestamps keep the order of
/// `logs` and of each log's revisions.
#[must_use]
pub fn flatten(logs: &[FileLog]) -> Vec<RevisionEvent<'_>> {
    let mut events: Vec<RevisionEvent<'_>> = logs
        .iter()
        .flat_map(|log| {
            log.revisions
                .values()
                .map(move |revision| RevisionEvent::new(log, revision))
        })
        .collect();
    events.sort_by_key(|event| event.timestamp);
    events
}
