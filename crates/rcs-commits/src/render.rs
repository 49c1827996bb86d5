// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Rendering the commit list for stdout

use std::fmt;

use rcs_cluster::Commit;

use crate::config::OutputFormat;

/// Indent for candidate message lines
const MESSAGE_INDENT: &str = "    ";

/// Indent for member lines
const MEMBER_INDENT: &str = "  ";

/// Plain-text report: one block per commit
///
/// ```text
/// commit 3 by mark at 1996/03/04 09:15:00
///     main.c: add -v option
///     update usage text
///   1996/03/04 09:15:00 RCS/main.c,v 1.2 main.c
/// ```
pub struct TextReport<'a>(pub &'a [Commit]);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, commit) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "commit {} by {} at {}", index + 1, commit.author, commit.date)?;
            if let Some(bucket) = commit.bucket {
                write!(f, " (bucket {})", bucket.format("%Y/%m/%d %H:%M:%S"))?;
            }
            writeln!(f)?;

            if commit.messages.is_empty() {
                writeln!(f, "{MESSAGE_INDENT}(no message)")?;
            }
            for line in commit.messages.iter().flat_map(|m| m.lines()) {
                writeln!(f, "{MESSAGE_INDENT}{line}")?;
            }
            for member in &commit.members {
                writeln!(
                    f,
                    "{MEMBER_INDENT}{} {} {} {}",
                    member.date, member.repository_file, member.revision, member.working_file
                )?;
            }
        }
        Ok(())
    }
}

/// Render `commits` in the requested format
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(commits: &[Commit], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(TextReport(commits).to_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(commits)?;
            json.push('\n');
            Ok(json)
        }
    }
}
