// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Error types for rcs-log

use thiserror::Error;

/// Errors that can occur while parsing rlog output
///
/// Every format error is fatal and carries the 1-based number of the line
/// that triggered it.
#[derive(Debug, Error)]
pub enum LogError {
    /// Error reading the input stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The same revision number appeared twice within one file record
    #[error("line {line}: duplicate revision {revision} in {file}")]
    DuplicateRevision {
        /// Line number of the second occurrence
        line: usize,
        /// The repeated revision number
        revision: String,
        /// Repository file of the record being parsed
        file: String,
    },

    /// A date/author line lacked a required `;` delimiter
    #[error("line {line}: no semicolon in {text:?}")]
    MissingSemicolon {
        /// Line number of the metadata line
        line: usize,
        /// The text that was searched
        text: String,
    },

    /// A date/author line had no `author:` sub-field after the date
    #[error("line {line}: no author: in {text:?}")]
    MissingAuthor {
        /// Line number of the metadata line
        line: usize,
        /// The text that should have started with the author label
        text: String,
    },

    /// The date text did not match any supported rlog date layout
    #[error("line {line}: invalid date {text:?}: {source}")]
    InvalidDate {
        /// Line number of the metadata line
        line: usize,
        /// The date text that failed to parse
        text: String,
        /// Underlying chrono parse error
        #[source]
        source: chrono::ParseError,
    },

    /// A revision metadata line appeared with no preceding revision line
    #[error("line {line}: revision metadata without a revision line: {text:?}")]
    OrphanRevisionMetadata {
        /// Line number of the metadata line
        line: usize,
        /// The metadata line
        text: String,
    },

    /// A structural line appeared where the record structure does not allow it
    #[error("line {line}: unexpected {text:?}: {reason}")]
    UnexpectedLine {
        /// Line number of the offending line
        line: usize,
        /// The offending line
        text: String,
        /// Why the line was not allowed here
        reason: &'static str,
    },

    /// A record was terminated without a required header field
    #[error("line {line}: record terminated without {field}")]
    MissingField {
        /// Line number of the terminator
        line: usize,
        /// Marker of the missing field, e.g. `Working file:`
        field: &'static str,
    },

    /// Input ended inside a record
    #[error("input ended at line {line} inside the record for {file}")]
    UnterminatedRecord {
        /// Number of the last line read
        line: usize,
        /// Repository file of the unfinished record
        file: String,
    },
}

impl LogError {
    /// Line number the error refers to, if it is a format error
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::DuplicateRevision { line, .. }
            | Self::MissingSemicolon { line, .. }
            | Self::MissingAuthor { line, .. }
            | Self::InvalidDate { line, .. }
            | Self::OrphanRevisionMetadata { line, .. }
            | Self::UnexpectedLine { line, .. }
            | Self::MissingField { line, .. }
            | Self::UnterminatedRecord { line, .. } => Some(*line),
        }
    }
}
