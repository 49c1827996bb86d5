// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Fixed-granularity bucketing
//!
//! Every revision's time is rounded to the nearest multiple of the
//! granularity and revisions are grouped by rounded time and author. Unlike
//! greedy grouping this can fail: if one file lands twice in a bucket the
//! granularity is too coarse for the history.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, TimeDelta, Utc};
use rcs_log::FileLog;
use tracing::{debug, info};

use crate::commit::{Commit, CommitBuilder, CommitKey};
use crate::error::ClusterError;
use crate::event::flatten;
use crate::saturating_seconds;

/// Default bucket width
pub const DEFAULT_GRANULARITY_SECS: i64 = 600;

/// Bucket width for bucketed grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketOptions {
    /// Width of one bucket
    pub granularity: TimeDelta,
}

impl BucketOptions {
    /// Create options from a width in whole seconds
    ///
    /// Widths beyond [`MAX_DURATION_SECS`](crate::MAX_DURATION_SECS) saturate.
    #[must_use]
    pub fn from_secs(granularity: i64) -> Self {
        Self {
            granularity: saturating_seconds(granularity),
        }
    }
}

impl Default for BucketOptions {
    fn default() -> Self {
        Self::from_secs(DEFAULT_GRANULARITY_SECS)
    }
}

/// Round `timestamp` to the nearest multiple of `width` seconds (halves round up)
#[must_use]
pub fn round_to(timestamp: DateTime<Utc>, width: i64) -> DateTime<Utc> {
    let secs = timestamp.timestamp();
    let rounded = (secs + width / 2).div_euclid(width) * width;
    DateTime::from_timestamp(rounded, 0).unwrap_or(timestamp)
}

/// Group every revision of `logs` into one commit per (rounded time, author)
///
/// # Errors
///
/// Returns [`ClusterError::InvalidGranularity`] for a width under one second and
/// [`ClusterError::DuplicateFileInBucket`] if a file appears twice in one bucket.
pub fn bucket(logs: &[FileLog], options: &BucketOptions) -> Result<Vec<Commit>, ClusterError> {
    let width = options.granularity.num_seconds();
    if width < 1 {
        return Err(ClusterError::InvalidGranularity { seconds: width });
    }

    let events = flatten(logs);
    let mut buckets: BTreeMap<CommitKey, CommitBuilder> = BTreeMap::new();
    for event in &events {
        let key = CommitKey {
            timestamp: round_to(event.timestamp, width),
            author: event.author.to_string(),
        };
        match buckets.entry(key) {
            Entry::Vacant(slot) => {
                debug!(
                    bucket = %slot.key().timestamp,
                    author = event.author,
                    "new bucket"
                );
                slot.insert(CommitBuilder::open(event));
            }
            Entry::Occupied(mut slot) => {
                if slot.get().has_repository_file(event.repository_file) {
                    return Err(ClusterError::DuplicateFileInBucket {
                        file: event.repository_file.to_string(),
                        author: event.author.to_string(),
                        bucket: slot.key().timestamp,
                        granularity: width,
                    });
                }
                slot.get_mut().admit(event);
            }
        }
    }

    let commits: Vec<Commit> = buckets
        .into_iter()
        .map(|(key, builder)| builder.build(Some(key.timestamp)))
        .collect();
    info!(
        revisions = events.len(),
        commits = commits.len(),
        granularity = width,
        "bucket clustering complete"
    );
    Ok(commits)
}
