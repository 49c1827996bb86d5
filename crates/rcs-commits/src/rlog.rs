// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Reading rlog output from a child process, a file or stdin
//!
//! Every source is read asynchronously and fed line by line into a
//! [`LogParser`], so dropping the read future stops the work, and for a child
//! process also kills it.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use rcs_log::{FileLog, LogError, LogParser};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

/// Errors while obtaining and parsing rlog output
#[derive(Debug, thiserror::Error)]
pub enum RlogError {
    /// The rlog program could not be started
    #[error("Failed to run {program}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The rlog program exited unsuccessfully
    #[error("{program} failed with {status}")]
    Failed {
        /// Program name
        program: String,
        /// Exit status
        status: ExitStatus,
    },

    /// The text was not valid rlog output
    #[error(transparent)]
    Log(#[from] LogError),

    /// Reading the input failed
    #[error("Failed to read {source_name}")]
    Io {
        /// What was being read
        source_name: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// An rlog invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlogCommand {
    /// Program to run
    pub program: String,
    /// Files passed as arguments
    pub files: Vec<PathBuf>,
}

impl RlogCommand {
    /// Create an invocation of `program` over `files`
    #[must_use]
    pub fn new(program: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            program: program.into(),
            files,
        }
    }

    /// Run the program and parse everything it prints
    ///
    /// The child is killed if this future is dropped before it completes, and
    /// killed and waited for if its output fails to parse.
    ///
    /// # Errors
    ///
    /// Returns [`RlogError::Spawn`] if the program cannot start,
    /// [`RlogError::Failed`] if it exits unsuccessfully and
    /// [`RlogError::Log`] if its output does not parse. No records are
    /// returned on failure.
    pub async fn run(&self) -> Result<Vec<FileLog>, RlogError> {
        debug!(program = %self.program, files = self.files.len(), "spawning");
        let mut child = Command::new(&self.program)
            .args(&self.files)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RlogError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| RlogError::Io {
            source_name: self.to_string(),
            source: io::Error::other("stdout was not captured"),
        })?;
        let logs = match read_logs(BufReader::new(stdout), &self.to_string()).await {
            Ok(logs) => logs,
            Err(e) => {
                // Stop and reap the child before reporting the read error.
                if let Err(kill) = child.start_kill() {
                    debug!(program = %self.program, error = %kill, "kill failed");
                }
                match child.wait().await {
                    Ok(status) => debug!(program = %self.program, %status, "stopped after error"),
                    Err(wait) => debug!(program = %self.program, error = %wait, "wait failed"),
                }
                return Err(e);
            }
        };

        let status = child.wait().await.map_err(|source| RlogError::Io {
            source_name: self.to_string(),
            source,
        })?;
        if !status.success() {
            return Err(RlogError::Failed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(logs)
    }
}

impl fmt::Display for RlogCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} output", self.program)
    }
}

/// Where rlog text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Run rlog
    Command(RlogCommand),
    /// A saved transcript
    File(PathBuf),
    /// A transcript on standard input
    Stdin,
}

impl Source {
    /// Read and parse every record from this source
    ///
    /// # Errors
    ///
    /// See [`RlogCommand::run`]; file and stdin sources fail with
    /// [`RlogError::Io`] or [`RlogError::Log`].
    pub async fn read(&self) -> Result<Vec<FileLog>, RlogError> {
        let logs = match self {
            Self::Command(command) => command.run().await?,
            Self::File(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|source| RlogError::Io {
                        source_name: self.to_string(),
                        source,
                    })?;
                read_logs(BufReader::new(file), &self.to_string()).await?
            }
            Self::Stdin => read_logs(BufReader::new(tokio::io::stdin()), &self.to_string()).await?,
        };
        info!(source = %self, records = logs.len(), "logs read");
        Ok(logs)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(command) => write!(f, "{command}"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("standard input"),
        }
    }
}

/// Feed every line of `reader` to a fresh parser
///
/// Lines are decoded as UTF-8, replacing invalid sequences.
///
/// # Errors
///
/// Returns the first read or parse error; records parsed before it are dropped.
pub async fn read_logs<R>(mut reader: R, source_name: &str) -> Result<Vec<FileLog>, RlogError>
where
    R: AsyncBufRead + Unpin,
{
    let mut parser = LogParser::new();
    let mut logs = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|source| RlogError::Io {
                source_name: source_name.to_string(),
                source,
            })?;
        if read == 0 {
            break;
        }
        if let Some(log) = parser.process_line(&String::from_utf8_lossy(&buf))? {
            logs.push(log);
        }
    }
    parser.finish()?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const RECORD: &str = "\
RCS file: RCS/a.c,v
Working file: a.c
head: 1.1
description:
----------------------------
revision 1.1
date: 1996/03/01 10:00:00;  author: mark;  state: Exp;
Initial revision
=============================================================================
";

    #[tokio::test]
    async fn test_read_logs_from_bytes() {
        let logs = read_logs(RECORD.as_bytes(), "test").await.expect("parses");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].working_file, "a.c");
        assert_eq!(logs[0].revisions["1.1"].author, "mark");
    }

    #[tokio::test]
    async fn test_read_logs_replaces_invalid_utf8() {
        let mut bytes = RECORD.replace("Initial revision", "caf\u{e9}").into_bytes();
        // Turn the two-byte UTF-8 e-acute into a lone Latin-1 byte.
        let at = bytes
            .windows(2)
            .position(|w| w == [0xc3, 0xa9])
            .expect("encoded e-acute");
        bytes[at] = 0xe9;
        bytes.remove(at + 1);

        let logs = read_logs(&bytes[..], "test").await.expect("parses");
        assert_eq!(logs[0].revisions["1.1"].description, "caf\u{fffd}\n");
    }

    #[tokio::test]
    async fn test_read_logs_truncated() {
        let cut = &RECORD[..RECORD.len() - 80];
        let err = read_logs(cut.as_bytes(), "test").await.unwrap_err();
        assert!(matches!(
            err,
            RlogError::Log(LogError::UnterminatedRecord { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = Source::File(PathBuf::from("/nonexistent/path/12345.rlog"));
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, RlogError::Io { .. }));
        assert!(err.to_string().contains("12345.rlog"));
    }

    #[test]
    fn test_source_display() {
        let command = Source::Command(RlogCommand::new("rlog", vec![]));
        assert_eq!(command.to_string(), "rlog output");
        assert_eq!(Source::Stdin.to_string(), "standard input");
    }
}
