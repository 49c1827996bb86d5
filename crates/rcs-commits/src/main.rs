// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! rcs-commits: infer atomic commits from RCS histories
//!
//! Runs rlog (or reads a saved transcript), groups the revisions into the
//! commits they most likely came from and prints them for review.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use rcs_commits::config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status after Ctrl-C, as a shell reports SIGINT
const EXIT_INTERRUPTED: u8 = 130;

/// Resolve on Ctrl-C; never resolve if the handler cannot be installed
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(config.log_level().into())
                .from_env_lossy(),
        )
        .init();

    if let Err(e) = config.validate() {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    tokio::select! {
        result = rcs_commits::run(&config) => match result {
            Ok(output) => {
                if let Err(e) = std::io::stdout().lock().write_all(output.as_bytes()) {
                    eprintln!("error: failed to write output: {e}");
                    return ExitCode::FAILURE;
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
        () = interrupted() => {
            debug!("interrupted");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}
