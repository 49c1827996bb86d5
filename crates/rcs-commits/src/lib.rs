// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! rcs-commits library
//!
//! The pieces behind the `rcs-commits` binary: configuration, reading rlog
//! output and rendering the inferred commits. Exported for integration tests.

use anyhow::Context;
use tracing::{info, warn};

pub mod config;
pub mod render;
pub mod rlog;

use config::Config;

/// Read, cluster and render according to `config`
///
/// Returns the complete output text; nothing is written until every step has
/// succeeded.
///
/// # Errors
///
/// Fails if the logs cannot be read or parsed, if the bucket strategy finds a
/// file twice in one bucket, or if rendering fails.
pub async fn run(config: &Config) -> anyhow::Result<String> {
    let source = config.source();
    let logs = source
        .read()
        .await
        .with_context(|| format!("Failed to load logs from {source}"))?;
    if logs.is_empty() {
        warn!(source = %source, "no RCS records found");
    }

    let strategy = config.to_strategy();
    let commits = strategy
        .apply(&logs)
        .context("Failed to group revisions into commits")?;
    rcs_cluster::check_partition(&logs, &commits)
        .context("Grouping lost or duplicated a revision")?;

    info!(
        files = logs.len(),
        revisions = logs.iter().map(|l| l.len()).sum::<usize>(),
        commits = commits.len(),
        strategy = strategy.name(),
        "clustering complete"
    );
    render::render(&commits, config.format).context("Failed to render commits")
}
