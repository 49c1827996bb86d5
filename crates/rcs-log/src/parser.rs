// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Streaming rlog parser
//!
//! rlog prints one block per file. Each block opens with a header
//! (`RCS file:`, `Working file:`, `head:`, ..., `description:`), followed by
//! one sub-block per revision separated by a line of 28 dashes, and ends with
//! a line of 77 equals signs:
//!
//! ```text
//! RCS file: RCS/main.c,v
//! Working file: main.c
//! head: 1.2
//! description:
//! entry point
//! ----------------------------
//! revision 1.2
//! date: 2020/02/19 17:04:11;  author: mark;  state: Exp;  lines: +2 -1
//! fix bug
//! ----------------------------
//! revision 1.1
//! date: 2020/02/19 16:00:00;  author: mark;  state: Exp;
//! Initial revision
//! =============================================================================
//! ```
//!
//! [`LogParser`] consumes that text one line at a time and hands back each
//! [`FileLog`] as soon as its terminator is seen.

use std::io::BufRead;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::error::LogError;
use crate::revision::{FileLog, Revision, parse_date};

/// Line that ends one file's record
pub const TERMINATOR: &str =
    "=============================================================================";

/// Line that separates the description and revision blocks inside a record
pub const BLOCK_SEPARATOR: &str = "----------------------------";

const REPOSITORY_FILE: &str = "RCS file:";
const WORKING_FILE: &str = "Working file:";
const HEAD: &str = "head:";
const DESCRIPTION: &str = "description:";
const REVISION: &str = "revision";
const REVISION_DATE: &str = "date:";
const AUTHOR: &str = "author:";

/// Where the parser is within the current record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Between records; only `RCS file:` starts a new one
    AwaitingNewRecord,
    /// Reading the file header or between revision blocks
    InRecordHeader,
    /// A `revision` line was read and its `date:` line is due
    InRevisionHeader,
    /// Capturing the overall file description
    CapturingDescription,
    /// Capturing the log message of the latest revision
    CapturingRevision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Description,
    Revision,
}

/// Fields of the record being read, created fresh for every `RCS file:` line
#[derive(Debug)]
struct RecordBuilder {
    repository_file: String,
    working_file: Option<String>,
    head: Option<String>,
    description: String,
    revisions: IndexMap<String, Revision>,
    pending_revision: Option<String>,
    capture: Option<Capture>,
}

impl RecordBuilder {
    fn new(repository_file: String) -> Self {
        Self {
            repository_file,
            working_file: None,
            head: None,
            description: String::new(),
            revisions: IndexMap::new(),
            pending_revision: None,
            capture: None,
        }
    }

    fn append(&mut self, line: &str) {
        let target = match self.capture {
            Some(Capture::Description) => &mut self.description,
            Some(Capture::Revision) => match self.revisions.last_mut() {
                Some((_, revision)) => &mut revision.description,
                None => return,
            },
            None => return,
        };
        target.push_str(line);
        target.push('\n');
    }

    fn build(self, line: usize) -> Result<FileLog, LogError> {
        if self.pending_revision.is_some() {
            return Err(LogError::MissingField {
                line,
                field: REVISION_DATE,
            });
        }
        let working_file = self.working_file.ok_or(LogError::MissingField {
            line,
            field: WORKING_FILE,
        })?;
        let head = self.head.ok_or(LogError::MissingField { line, field: HEAD })?;
        Ok(FileLog {
            repository_file: self.repository_file,
            working_file,
            head,
            description: self.description,
            revisions: self.revisions,
        })
    }
}

/// Text after `marker` and one separator character, trimmed
fn field_value<'a>(line: &'a str, marker: &str) -> &'a str {
    let mut rest = line[marker.len()..].chars();
    rest.next();
    rest.as_str().trim()
}

/// Split `<date>;  author: <author>;  <rest>` into its date and author
fn split_date_author(line: usize, text: &str) -> Result<(&str, &str), LogError> {
    let Some((date, rest)) = text.split_once(';') else {
        return Err(LogError::MissingSemicolon {
            line,
            text: text.to_string(),
        });
    };
    let rest = rest.trim();
    if !rest.starts_with(AUTHOR) {
        return Err(LogError::MissingAuthor {
            line,
            text: rest.to_string(),
        });
    }
    let author_field = field_value(rest, AUTHOR);
    let Some((author, _)) = author_field.split_once(';') else {
        return Err(LogError::MissingSemicolon {
            line,
            text: author_field.to_string(),
        });
    };
    Ok((date.trim(), author.trim()))
}

/// Push parser for rlog output
///
/// Feed it lines with [`LogParser::process_line`]; each call that completes a
/// record returns the finished [`FileLog`]. Call [`LogParser::finish`] at end of
/// input to detect a truncated stream.
#[derive(Debug, Default)]
pub struct LogParser {
    record: Option<RecordBuilder>,
    line_number: usize,
    records_emitted: usize,
}

impl LogParser {
    /// Create a parser positioned before the first record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in the record structure
    #[must_use]
    pub fn state(&self) -> ParserState {
        match &self.record {
            None => ParserState::AwaitingNewRecord,
            Some(record) => match record.capture {
                Some(Capture::Description) => ParserState::CapturingDescription,
                Some(Capture::Revision) => ParserState::CapturingRevision,
                None if record.pending_revision.is_some() => ParserState::InRevisionHeader,
                None => ParserState::InRecordHeader,
            },
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Number of records completed so far
    #[must_use]
    pub fn records_emitted(&self) -> usize {
        self.records_emitted
    }

    /// Process a single line of rlog output
    ///
    /// One trailing `\n` is stripped; everything else is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`LogError`] format variant if the line breaks the rlog
    /// record structure. The parser should not be used after an error.
    pub fn process_line(&mut self, line: &str) -> Result<Option<FileLog>, LogError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        self.line_number += 1;
        let number = self.line_number;
        trace!(line = number, text = line, "read");

        if line == TERMINATOR {
            let Some(record) = self.record.take() else {
                return Err(LogError::MissingField {
                    line: number,
                    field: REPOSITORY_FILE,
                });
            };
            let log = record.build(number)?;
            self.records_emitted += 1;
            debug!(
                file = %log.repository_file,
                revisions = log.revisions.len(),
                "record complete"
            );
            return Ok(Some(log));
        }

        if let Some(record) = self.record.as_mut() {
            if record.capture.is_some() {
                if line == BLOCK_SEPARATOR {
                    record.capture = None;
                } else {
                    record.append(line);
                }
                return Ok(None);
            }
        }

        self.process_structural(number, line)?;
        Ok(None)
    }

    fn process_structural(&mut self, number: usize, line: &str) -> Result<(), LogError> {
        if line.starts_with(REPOSITORY_FILE) {
            if self.record.is_some() {
                return Err(LogError::UnexpectedLine {
                    line: number,
                    text: line.to_string(),
                    reason: "previous record was not terminated",
                });
            }
            let path = field_value(line, REPOSITORY_FILE).to_string();
            debug!(file = %path, line = number, "record start");
            self.record = Some(RecordBuilder::new(path));
            return Ok(());
        }

        let is_structural = [WORKING_FILE, HEAD, DESCRIPTION, REVISION, REVISION_DATE]
            .iter()
            .any(|marker| line.starts_with(marker));
        let Some(record) = self.record.as_mut() else {
            if is_structural {
                return Err(LogError::UnexpectedLine {
                    line: number,
                    text: line.to_string(),
                    reason: "no RCS file: line opened a record",
                });
            }
            return Ok(());
        };

        if line.starts_with(WORKING_FILE) {
            record.working_file = Some(field_value(line, WORKING_FILE).to_string());
        } else if line.starts_with(HEAD) {
            record.head = Some(field_value(line, HEAD).to_string());
        } else if line.starts_with(DESCRIPTION) {
            record.description.clear();
            record.capture = Some(Capture::Description);
        } else if line.starts_with(REVISION) {
            let value = field_value(line, REVISION);
            let revision = value.split('\t').next().unwrap_or(value).to_string();
            if !Revision::is_valid_number(&revision) {
                warn!(line = number, revision = %revision, "unusual revision number");
            }
            if let Some(previous) = record.pending_revision.replace(revision) {
                warn!(line = number, revision = %previous, "revision line without date line");
            }
        } else if line.starts_with(REVISION_DATE) {
            let Some(revision) = record.pending_revision.take() else {
                return Err(LogError::OrphanRevisionMetadata {
                    line: number,
                    text: line.to_string(),
                });
            };
            let (date, author) = split_date_author(number, field_value(line, REVISION_DATE))?;
            let timestamp = parse_date(date).map_err(|source| LogError::InvalidDate {
                line: number,
                text: date.to_string(),
                source,
            })?;
            if record.revisions.contains_key(&revision) {
                return Err(LogError::DuplicateRevision {
                    line: number,
                    revision,
                    file: record.repository_file.clone(),
                });
            }
            trace!(line = number, revision = %revision, author, date, "revision");
            record.revisions.insert(
                revision.clone(),
                Revision {
                    revision,
                    author: author.to_string(),
                    date: date.to_string(),
                    timestamp,
                    description: String::new(),
                },
            );
            record.capture = Some(Capture::Revision);
        }
        Ok(())
    }

    /// Signal end of input
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnterminatedRecord`] if input ended inside a record.
    /// The partial record is discarded.
    pub fn finish(self) -> Result<(), LogError> {
        match self.record {
            Some(record) => Err(LogError::UnterminatedRecord {
                line: self.line_number,
                file: record.repository_file,
            }),
            None => {
                debug!(
                    lines = self.line_number,
                    records = self.records_emitted,
                    "input complete"
                );
                Ok(())
            }
        }
    }
}

/// Iterator that pulls lines from a reader and yields each completed record
///
/// Lines are decoded as UTF-8, replacing invalid sequences. After the first
/// error the iterator is exhausted.
pub struct FileLogs<R: BufRead> {
    reader: R,
    parser: Option<LogParser>,
    buf: Vec<u8>,
}

impl<R: BufRead> FileLogs<R> {
    /// Create an iterator over the records in `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            parser: Some(LogParser::new()),
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for FileLogs<R> {
    type Item = Result<FileLog, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let parser = self.parser.as_mut()?;
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    let parser = self.parser.take()?;
                    return parser.finish().err().map(Err);
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.buf);
                    match parser.process_line(&line) {
                        Ok(Some(log)) => return Some(Ok(log)),
                        Ok(None) => {}
                        Err(e) => {
                            self.parser = None;
                            return Some(Err(e));
                        }
                    }
                }
                Err(e) => {
                    self.parser = None;
                    return Some(Err(LogError::from(e)));
                }
            }
        }
    }
}

/// Parse all records from a reader
///
/// # Errors
///
/// Returns the first [`LogError`] encountered; records parsed before it are discarded.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<FileLog>, LogError> {
    FileLogs::new(reader).collect()
}

/// Parse all records from a string holding a complete rlog transcript
///
/// # Errors
///
/// Returns the first [`LogError`] encountered.
pub fn parse_str(text: &str) -> Result<Vec<FileLog>, LogError> {
    parse_reader(text.as_bytes())
}
