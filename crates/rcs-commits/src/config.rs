// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Command-line configuration
//!
//! Options come from arguments, with `GRANULARITY` and `RLOG` also read from
//! the environment.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rcs_cluster::bucket::DEFAULT_GRANULARITY_SECS;
use rcs_cluster::greedy::DEFAULT_BIG_GAP_SECS;
use rcs_cluster::{BucketOptions, GapOptions, MAX_DURATION_SECS, Strategy};

use crate::rlog::{RlogCommand, Source};

/// Path that selects standard input for `--input`
pub const STDIN_PATH: &str = "-";

/// Grouping strategy selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrategyKind {
    /// Walk revisions in time order, splitting on author, file and gaps
    #[default]
    Greedy,
    /// Round times to the granularity and group by bucket and author
    Bucket,
}

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable commit blocks
    #[default]
    Text,
    /// The commit list as JSON
    Json,
}

/// rcs-commits - group RCS revisions into the commits they came from
#[derive(Parser, Debug, Clone)]
#[command(name = "rcs-commits")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Working files (or `,v` files) to pass to rlog
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Read a saved rlog transcript instead of running rlog (`-` for stdin)
    #[arg(short, long, value_name = "FILE", conflicts_with = "files")]
    pub input: Option<PathBuf>,

    /// Program used to print the logs
    #[arg(long, env = "RLOG", default_value = "rlog")]
    pub rlog: String,

    /// Grouping strategy
    #[arg(short, long, value_enum, default_value_t = StrategyKind::Greedy)]
    pub strategy: StrategyKind,

    /// Time granularity in seconds
    ///
    /// The bucket width for `--strategy bucket`, and the small gap for the
    /// greedy strategy unless `--small-gap` is given.
    #[arg(
        short,
        long,
        env = "GRANULARITY",
        default_value_t = DEFAULT_GRANULARITY_SECS,
        value_parser = clap::value_parser!(i64).range(0..=MAX_DURATION_SECS)
    )]
    pub granularity: i64,

    /// Gap in seconds above which unrelated revisions split (greedy)
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=MAX_DURATION_SECS))]
    pub small_gap: Option<i64>,

    /// Gap in seconds above which revisions always split (greedy)
    #[arg(
        long,
        default_value_t = DEFAULT_BIG_GAP_SECS,
        value_parser = clap::value_parser!(i64).range(0..=MAX_DURATION_SECS)
    )]
    pub big_gap: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level)
    ///
    /// Logs go to stderr, so stdout carries only the commit list.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            input: None,
            rlog: "rlog".to_string(),
            strategy: StrategyKind::default(),
            granularity: DEFAULT_GRANULARITY_SECS,
            small_gap: None,
            big_gap: DEFAULT_BIG_GAP_SECS,
            format: OutputFormat::default(),
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Small gap for greedy grouping: `--small-gap`, else the granularity
    #[must_use]
    pub fn small_gap_secs(&self) -> i64 {
        self.small_gap.unwrap_or(self.granularity)
    }

    /// The grouping strategy these options describe
    #[must_use]
    pub fn to_strategy(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Greedy => {
                Strategy::Greedy(GapOptions::from_secs(self.small_gap_secs(), self.big_gap))
            }
            StrategyKind::Bucket => Strategy::Bucket(BucketOptions::from_secs(self.granularity)),
        }
    }

    /// Where the rlog text comes from
    #[must_use]
    pub fn source(&self) -> Source {
        match &self.input {
            Some(path) if path.as_os_str() == STDIN_PATH => Source::Stdin,
            Some(path) => Source::File(path.clone()),
            None => Source::Command(RlogCommand::new(&self.rlog, self.files.clone())),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither files nor `--input` are given, or both are
    /// - The granularity or a gap is zero or too large for a duration
    /// - The small gap exceeds the big gap under the greedy strategy
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.files.is_empty(), &self.input) {
            (true, None) => return Err(ConfigError::NoInput),
            (false, Some(_)) => return Err(ConfigError::ConflictingInput),
            _ => {}
        }

        check_duration("--granularity", self.granularity)?;
        if self.strategy == StrategyKind::Greedy {
            let small = self.small_gap_secs();
            check_duration("--small-gap", small)?;
            check_duration("--big-gap", self.big_gap)?;
            if small > self.big_gap {
                return Err(ConfigError::GapOrder {
                    small,
                    big: self.big_gap,
                });
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Reject durations of zero or beyond [`MAX_DURATION_SECS`]
fn check_duration(option: &'static str, secs: i64) -> Result<(), ConfigError> {
    if secs < 1 {
        Err(ConfigError::NotPositive(option))
    } else if secs > MAX_DURATION_SECS {
        Err(ConfigError::TooLarge {
            option,
            max: MAX_DURATION_SECS,
        })
    } else {
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Nothing to read
    #[error("No input: name files to pass to rlog, or use --input")]
    NoInput,

    /// Files and a transcript were both given
    #[error("Files and --input cannot be combined")]
    ConflictingInput,

    /// A duration option was zero
    #[error("{0} must be at least one second")]
    NotPositive(&'static str),

    /// A duration option does not fit a time delta
    #[error("{option} must be at most {max} seconds")]
    TooLarge {
        /// Offending option
        option: &'static str,
        /// Largest accepted value
        max: i64,
    },

    /// Small gap larger than big gap
    #[error("Small gap ({small}s) exceeds big gap ({big}s)")]
    GapOrder {
        /// Effective small gap in seconds
        small: i64,
        /// Big gap in seconds
        big: i64,
    },
}
