// Copyright (c) 2026 - present rcs-commits contributors
// SPDX-License-Identifier: MIT

//! Inferred commit types

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use rcs_log::revision::INITIAL_REVISION;
use serde::{Deserialize, Serialize};

use crate::event::RevisionEvent;

/// Canonical form of a log message used for de-duplication
///
/// Lowercased, trimmed, with every run of whitespace collapsed to one space.
#[must_use]
pub fn normalize_message(description: &str) -> String {
    description
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Ordered, de-duplicated `"<working file>: <message>"` lines for one commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateMessages {
    keys: IndexSet<String>,
    messages: Vec<String>,
}

impl CandidateMessages {
    /// Create an empty message list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the message of one revision
    ///
    /// Returns false, leaving the list unchanged, when the message is blank,
    /// is the "Initial revision" boilerplate, or matches an earlier message
    /// ignoring case and whitespace.
    pub fn admit(&mut self, working_file: &str, description: &str) -> bool {
        let key = normalize_message(description);
        if key.is_empty() || key == INITIAL_REVISION || self.keys.contains(&key) {
            return false;
        }
        self.keys.insert(key);
        self.messages
            .push(format!("{working_file}: {}", description.trim_end()));
        true
    }

    /// Admitted messages in first-seen order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.messages
    }

    /// Number of admitted messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when no message was admitted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consume into the admitted messages
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

/// One revision placed in a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// When the revision was checked in
    pub timestamp: DateTime<Utc>,
    /// Date text as rlog printed it
    pub date: String,
    /// Path of the `,v` file
    pub repository_file: String,
    /// Revision number
    pub revision: String,
    /// Path of the working file
    pub working_file: String,
}

/// Key a commit was grouped and sorted under
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitKey {
    /// Representative time (the bucket time for bucketed commits)
    pub timestamp: DateTime<Utc>,
    /// Author of every member
    pub author: String,
}

/// A group of revisions believed to come from one real change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Author of every member
    pub author: String,
    /// Timestamp of the first admitted member
    pub timestamp: DateTime<Utc>,
    /// Date text of the first admitted member
    pub date: String,
    /// Rounded bucket time, set only by the bucket strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<DateTime<Utc>>,
    /// Candidate commit message lines
    pub messages: Vec<String>,
    /// Member revisions, ordered by timestamp then admission
    pub members: Vec<Member>,
}

impl Commit {
    /// The grouping key
    #[must_use]
    pub fn key(&self) -> CommitKey {
        CommitKey {
            timestamp: self.bucket.unwrap_or(self.timestamp),
            author: self.author.clone(),
        }
    }

    /// Number of member revisions
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the commit has no members (never produced by the clusterer)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether a working file is among the members
    #[must_use]
    pub fn touches(&self, working_file: &str) -> bool {
        self.members.iter().any(|m| m.working_file == working_file)
    }

    /// Candidate messages joined into a draft commit message
    #[must_use]
    pub fn draft_message(&self) -> String {
        self.messages.join("\n")
    }
}

/// A commit under construction
#[derive(Debug)]
pub(crate) struct CommitBuilder {
    author: String,
    timestamp: DateTime<Utc>,
    date: String,
    messages: CandidateMessages,
    members: Vec<Member>,
    working_files: IndexSet<String>,
    repository_files: IndexSet<String>,
}

impl CommitBuilder {
    /// Open a commit seeded with `event`
    pub(crate) fn open(event: &RevisionEvent<'_>) -> Self {
        let mut builder = Self {
            author: event.author.to_string(),
            timestamp: event.timestamp,
            date: event.date.to_string(),
            messages: CandidateMessages::new(),
            members: Vec::new(),
            working_files: IndexSet::new(),
            repository_files: IndexSet::new(),
        };
        builder.admit(event);
        builder
    }

    pub(crate) fn author(&self) -> &str {
        &self.author
    }

    pub(crate) fn has_working_file(&self, working_file: &str) -> bool {
        self.working_files.contains(working_file)
    }

    pub(crate) fn has_repository_file(&self, repository_file: &str) -> bool {
        self.repository_files.contains(repository_file)
    }

    pub(crate) fn admit(&mut self, event: &RevisionEvent<'_>) {
        self.working_files.insert(event.working_file.to_string());
        self.repository_files
            .insert(event.repository_file.to_string());
        self.messages.admit(event.working_file, event.description);
        self.members.push(Member {
            timestamp: event.timestamp,
            date: event.date.to_string(),
            repository_file: event.repository_file.to_string(),
            revision: event.revision.to_string(),
            working_file: event.working_file.to_string(),
        });
    }

    pub(crate) fn build(self, bucket: Option<DateTime<Utc>>) -> Commit {
        Commit {
            author: self.author,
            timestamp: self.timestamp,
            date: self.date,
            bucket,
            messages: self.messages.into_vec(),
            members: self.members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_normalize_message() {
        assert_eq!(normalize_message("  Fix  BUG\n\tnow\n"), "fix bug now");
        assert_eq!(normalize_message("\n \t"), "");
        assert_eq!(normalize_message("Initial revision\n"), INITIAL_REVISION);
    }

    #[test]
    fn test_admit_skips_boilerplate_and_blank() {
        let mut messages = CandidateMessages::new();
        assert!(!messages.admit("a.c", "Initial revision\n"));
        assert!(!messages.admit("a.c", "INITIAL   REVISION"));
        assert!(!messages.admit("a.c", " \n"));
        assert!(!messages.admit("a.c", ""));
        assert!(messages.is_empty());
    }

    #[test]
    fn test_admit_dedups_case_and_whitespace() {
        let mut messages = CandidateMessages::new();
        assert!(messages.admit("a.c", "Fix bug\n"));
        assert!(!messages.admit("b.c", "fix  BUG"));
        assert!(messages.admit("b.c", "other change\n"));
        assert_eq!(
            messages.as_slice(),
            &["a.c: Fix bug".to_string(), "b.c: other change".to_string()]
        );
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_admit_keeps_inner_lines() {
        let mut messages = CandidateMessages::new();
        messages.admit("a.c", "add -v option\nupdate usage text\n");
        assert_eq!(
            messages.into_vec(),
            vec!["a.c: add -v option\nupdate usage text".to_string()]
        );
    }

    fn sample_commit() -> Commit {
        let member = |file: &str, rev: &str| Member {
            timestamp: DateTime::from_timestamp(1_582_113_600, 0).unwrap(),
            date: "2020/02/19 12:00:00".to_string(),
            repository_file: format!("RCS/{file},v"),
            revision: rev.to_string(),
            working_file: file.to_string(),
        };
        Commit {
            author: "mark".to_string(),
            timestamp: DateTime::from_timestamp(1_582_113_600, 0).unwrap(),
            date: "2020/02/19 12:00:00".to_string(),
            bucket: None,
            messages: vec!["a.c: fix bug".to_string(), "b.c: tidy".to_string()],
            members: vec![member("a.c", "1.2"), member("b.c", "1.7")],
        }
    }

    #[test]
    fn test_commit_helpers() {
        let commit = sample_commit();
        assert_eq!(commit.len(), 2);
        assert!(!commit.is_empty());
        assert!(commit.touches("b.c"));
        assert!(!commit.touches("c.c"));
        assert_eq!(commit.draft_message(), "a.c: fix bug\nb.c: tidy");
    }

    #[test]
    fn test_commit_key_prefers_bucket() {
        let mut commit = sample_commit();
        assert_eq!(commit.key().timestamp, commit.timestamp);

        let bucket = DateTime::from_timestamp(1_582_114_200, 0).unwrap();
        commit.bucket = Some(bucket);
        assert_eq!(commit.key().timestamp, bucket);
        assert_eq!(commit.key().author, "mark");
    }

    #[test]
    fn test_commit_json_omits_missing_bucket() {
        let json = serde_json::to_string(&sample_commit()).expect("serialize");
        assert!(!json.contains("bucket"));
        assert!(json.contains("\"messages\":[\"a.c: fix bug\",\"b.c: tidy\"]"));

        let back: Commit = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, sample_commit());
    }
}
