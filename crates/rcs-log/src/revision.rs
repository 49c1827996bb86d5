// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! RCS revision and per-file history types

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Boilerplate message RCS records for the first check-in of a file
pub const INITIAL_REVISION: &str = "initial revision";

/// Date layout printed by classic rlog (always UTC)
pub const CLASSIC_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Date layout printed by `rlog -z` without a zone suffix
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date layout printed by `rlog -z` with a numeric zone suffix (`+hh`, `+hhmm`, `+hh:mm`)
pub const ISO_ZONED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%#z";

/// Parse an rlog date into a UTC timestamp
///
/// Dates without a zone are taken to be UTC, which is what rlog prints
/// unless told otherwise.
///
/// # Errors
///
/// Returns the chrono parse error if the text matches none of the supported layouts.
pub fn parse_date(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if text.contains('/') {
        return NaiveDateTime::parse_from_str(text, CLASSIC_DATE_FORMAT).map(|n| n.and_utc());
    }
    match NaiveDateTime::parse_from_str(text, ISO_DATE_FORMAT) {
        Ok(naive) => Ok(naive.and_utc()),
        Err(_) => DateTime::parse_from_str(text, ISO_ZONED_DATE_FORMAT)
            .map(|zoned| zoned.with_timezone(&Utc)),
    }
}

/// One recorded change to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Dotted revision number, unique within its file
    pub revision: String,
    /// Login of the author
    pub author: String,
    /// Date text exactly as rlog printed it
    pub date: String,
    /// Parsed date
    pub timestamp: DateTime<Utc>,
    /// Log message, one `\n`-terminated entry per captured line
    pub description: String,
}

impl Revision {
    /// Check whether a revision number has the dotted numeric RCS shape
    ///
    /// Trunk revisions have two components (`1.4`), branch revisions an even
    /// number greater than two (`1.2.1.3`).
    #[must_use]
    pub fn is_valid_number(revision: &str) -> bool {
        let parts: Vec<&str> = revision.split('.').collect();
        parts.len() >= 2
            && parts.len() % 2 == 0
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    }

    /// Check whether this revision lies on the trunk
    #[must_use]
    pub fn is_trunk(&self) -> bool {
        self.revision.split('.').count() == 2
    }

    /// False for an all-whitespace message or RCS's "Initial revision" boilerplate
    #[must_use]
    pub fn has_message(&self) -> bool {
        let message = self.description.trim();
        !message.is_empty() && !message.eq_ignore_ascii_case(INITIAL_REVISION)
    }

    /// First line of the log message
    #[must_use]
    pub fn subject(&self) -> &str {
        self.description.lines().next().unwrap_or("")
    }
}

/// The complete rlog record for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLog {
    /// Path of the `,v` history file
    pub repository_file: String,
    /// Path of the checked-out working file
    pub working_file: String,
    /// Tip revision number
    pub head: String,
    /// Overall file description (not tied to any revision)
    pub description: String,
    /// Revisions keyed by revision number, in the order rlog listed them
    pub revisions: IndexMap<String, Revision>,
}

impl FileLog {
    /// Look up a revision by number
    #[must_use]
    pub fn revision(&self, revision: &str) -> Option<&Revision> {
        self.revisions.get(revision)
    }

    /// The revision named by `head:`, if it was selected into the log
    #[must_use]
    pub fn head_revision(&self) -> Option<&Revision> {
        self.revisions.get(&self.head)
    }

    /// Number of revisions in the record
    #[must_use]
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// True when rlog selected no revisions for this file
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}
