// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Choice of grouping strategy

use rcs_log::FileLog;

use crate::bucket::{BucketOptions, bucket};
use crate::commit::Commit;
use crate::error::ClusterError;
use crate::greedy::{GapOptions, cluster};

/// How revisions are grouped into commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Sequential greedy grouping by gaps, author and files (the default)
    Greedy(GapOptions),
    /// Fixed-width time buckets per author
    Bucket(BucketOptions),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Greedy(GapOptions::default())
    }
}

impl Strategy {
    /// Group every revision of `logs` into commits
    ///
    /// # Errors
    ///
    /// Only the bucket strategy can fail; see [`bucket`].
    pub fn apply(&self, logs: &[FileLog]) -> Result<Vec<Commit>, ClusterError> {
        match self {
            Self::Greedy(options) => Ok(cluster(logs, options)),
            Self::Bucket(options) => bucket(logs, options),
        }
    }

    /// Short name used in logs and on the command line
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Greedy(_) => "greedy",
            Self::Bucket(_) => "bucket",
        }
    }
}
