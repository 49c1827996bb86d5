// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Builders for hand-written test histories

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use rcs_log::{FileLog, Revision};

/// 2020-02-19 12:00:00 UTC
pub(crate) const BASE_SECS: i64 = 1_582_113_600;

/// A revision checked in `offset` seconds after the base time
pub(crate) fn rev(revision: &str, author: &str, offset: i64, description: &str) -> Revision {
    let timestamp = DateTime::from_timestamp(BASE_SECS, 0).expect("valid base")
        + TimeDelta::seconds(offset);
    Revision {
        revision: revision.to_string(),
        author: author.to_string(),
        date: timestamp.format("%Y/%m/%d %H:%M:%S").to_string(),
        timestamp,
        description: description.to_string(),
    }
}

/// A record for `working_file` stored in `RCS/<working_file>,v`
pub(crate) fn file_log(working_file: &str, revisions: Vec<Revision>) -> FileLog {
    let head = revisions
        .first()
        .map(|r| r.revision.clone())
        .unwrap_or_else(|| "1.1".to_string());
    let revisions: IndexMap<String, Revision> = revisions
        .into_iter()
        .map(|r| (r.revision.clone(), r))
        .collect();
    FileLog {
        repository_file: format!("RCS/{working_file},v"),
        working_file: working_file.to_string(),
        head,
        description: String::new(),
        revisions,
    }
}

/// Convenience for comparing against `Utc` timestamps
pub(crate) fn at(offset: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_SECS + offset, 0).expect("valid offset")
}
