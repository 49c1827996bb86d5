// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Check that commits account for every revision exactly once

use std::collections::HashSet;

use rcs_log::FileLog;

use crate::commit::Commit;
use crate::error::ClusterError;

/// Verify that `commits` partition the revisions of `logs`
///
/// # Errors
///
/// Returns [`ClusterError::PartitionViolation`] naming the first revision that
/// is unknown, duplicated, or missing from the commits.
pub fn check_partition(logs: &[FileLog], commits: &[Commit]) -> Result<(), ClusterError> {
    let mut expected: HashSet<(&str, &str)> = logs
        .iter()
        .flat_map(|log| {
            log.revisions
                .keys()
                .map(move |rev| (log.repository_file.as_str(), rev.as_str()))
        })
        .collect();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for member in commits.iter().flat_map(|c| &c.members) {
        let pair = (member.repository_file.as_str(), member.revision.as_str());
        if expected.remove(&pair) {
            seen.insert(pair);
            continue;
        }
        let problem = if seen.contains(&pair) {
            "in more than one commit"
        } else {
            "not in the log"
        };
        return Err(ClusterError::PartitionViolation {
            file: member.repository_file.clone(),
            revision: member.revision.clone(),
            problem,
        });
    }

    match expected.into_iter().min() {
        Some((file, revision)) => Err(ClusterError::PartitionViolation {
            file: file.to_string(),
            revision: revision.to_string(),
            problem: "missing from every commit",
        }),
        None => Ok(()),
    }
}
