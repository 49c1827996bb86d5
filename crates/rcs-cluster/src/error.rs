// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Error types for rcs-cluster

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while grouping revisions into commits
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Bucket width must be at least one second
    #[error("Invalid granularity: {seconds}s (must be at least 1s)")]
    InvalidGranularity {
        /// The rejected width in seconds
        seconds: i64,
    },

    /// Two revisions of one file rounded into the same bucket
    #[error(
        "{file} appears twice in the {author} bucket at {bucket}; \
         use a granularity finer than {granularity}s"
    )]
    DuplicateFileInBucket {
        /// Repository file seen twice
        file: String,
        /// Author of the bucket
        author: String,
        /// Rounded bucket time
        bucket: DateTime<Utc>,
        /// Bucket width in seconds
        granularity: i64,
    },

    /// The commits do not partition the input revisions exactly
    #[error("Revision {revision} of {file} is {problem}")]
    PartitionViolation {
        /// Repository file of the offending revision
        file: String,
        /// Revision number
        revision: String,
        /// What went wrong: missing, duplicated or unknown
        problem: &'static str,
    },
}
