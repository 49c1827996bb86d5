// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! rcs-log: RCS `rlog` output parsing for rcs-commits
//!
//! This library crate turns the block-structured text printed by `rlog` into
//! typed [`FileLog`] records, one per file, each holding its [`Revision`]s.
//! Parsing is a single forward pass, so records become available while the
//! producing process is still writing.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use rcs_log::FileLogs;
//! use std::io::BufReader;
//!
//! let file = std::fs::File::open("rlog.txt").expect("open transcript");
//! for log in FileLogs::new(BufReader::new(file)) {
//!     let log = log.expect("well-formed rlog output");
//!     println!("{}: {} revisions", log.working_file, log.len());
//! }
//! ```

pub mod error;
pub mod parser;
pub mod revision;

pub use error::LogError;
pub use parser::{FileLogs, LogParser, ParserState, parse_reader, parse_str};
pub use revision::{FileLog, Revision};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::LogError;
    pub use crate::parser::{FileLogs, LogParser, parse_reader};
    pub use crate::revision::{FileLog, Revision};
}
