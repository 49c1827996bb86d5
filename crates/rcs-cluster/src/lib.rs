// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! rcs-cluster: inferring atomic commits from per-file RCS history
//!
//! RCS records each file's history separately. This crate flattens the
//! revisions of many [`FileLog`](rcs_log::FileLog)s into one timeline and
//! partitions it into [`Commit`]s, the changes an atomic-commit VCS would have
//! recorded. Two strategies are available: [`greedy`] (the default) and
//! [`bucket`].

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use rcs_cluster::{GapOptions, cluster};
//!
//! let text = std::fs::read_to_string("rlog.txt").expect("read transcript");
//! let logs = rcs_log::parse_str(&text).expect("parse");
//! for commit in cluster(&logs, &GapOptions::default()) {
//!     println!("{} {} ({} files)", commit.date, commit.author, commit.len());
//! }
//! ```

use chrono::TimeDelta;

pub mod bucket;
pub mod commit;
pub mod error;
pub mod event;
pub mod greedy;
pub mod partition;
pub mod strategy;

#[cfg(test)]
mod testing;

pub use bucket::BucketOptions;
pub use commit::{CandidateMessages, Commit, CommitKey, Member, normalize_message};
pub use error::ClusterError;
pub use event::{RevisionEvent, flatten};
pub use greedy::{GapOptions, SplitReason, cluster};
pub use partition::check_partition;
pub use strategy::Strategy;

/// Largest gap or granularity, in seconds, that fits a [`TimeDelta`]
pub const MAX_DURATION_SECS: i64 = i64::MAX / 1000;

/// `secs` as a duration, saturating at [`TimeDelta::MIN`] and [`TimeDelta::MAX`]
pub(crate) fn saturating_seconds(secs: i64) -> TimeDelta {
    TimeDelta::try_seconds(secs).unwrap_or(if secs < 0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}


/// Re-export commonly used types
pub mod prelude {
    pub use crate::bucket::BucketOptions;
    pub use crate::commit::{Commit, Member};
    pub use crate::error::ClusterError;
    pub use crate::greedy::{GapOptions, cluster};
    pub use crate::strategy::Strategy;
}
