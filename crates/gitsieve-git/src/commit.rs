//! Commit and identity types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person attached to a commit, as author or committer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// When this identity signed the commit
    pub when: DateTime<Utc>,
}

impl Identity {
    /// Create an identity stamped with the Unix epoch
    ///
    /// Useful for matching, where only name and email matter.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Replace the timestamp
    #[must_use]
    pub fn at(mut self, when: DateTime<Utc>) -> Self {
        self.when = when;
        self
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A commit as read from the repository
///
/// Commits are immutable once read; nothing in gitsieve mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// SHA of the root tree
    pub tree: String,
    /// Author identity
    pub author: Identity,
    /// Committer identity
    pub committer: Identity,
    /// Full commit message
    pub message: String,
    /// Parent commit SHAs, first parent first
    pub parents: Vec<String>,
}

impl Commit {
    /// Validate that a SHA is a valid 40-character hex string
    #[must_use]
    pub fn is_valid_sha(sha: &str) -> bool {
        sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Check if this is a root commit (has no parents)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Commit time, taken from the committer
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.committer.when
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    fn sample_commit() -> Commit {
        let when = Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap();
        let author = Identity::new("Test Author", "test@example.com").at(when);
        Commit {
            sha: "1945ab9c752534e733c38ba0109dc3b741f0a6eb".to_string(),
            tree: "4b825dc642cb6eb9a060e54bf8d69288fbee4904".to_string(),
            committer: author.clone(),
            author,
            message: "Add milestone filter\n\nSigned-off-by: Test Author <test@example.com>"
                .to_string(),
            parents: vec!["c460aeb7fb2d109c17e43de0ce681faec0b7374d".to_string()],
        }
    }

    #[test]
    fn test_commit_serialization_roundtrip() {
        let commit = sample_commit();
        let json = serde_json::to_string(&commit).expect("serialize");
        let deserialized: Commit = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(commit, deserialized);
    }

    #[test]
    fn test_identity_display() {
        let identity = Identity::new("Test user", "test@user.com");
        assert_eq!(identity.to_string(), "Test user <test@user.com>");
    }

    #[test]
    fn test_is_valid_sha_invalid() {
        // Too short
        assert!(!Commit::is_valid_sha("1945ab9"));
        // Invalid characters
        assert!(!Commit::is_valid_sha(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eg"
        ));
        assert!(!Commit::is_valid_sha(""));
    }

    #[test]
    fn test_short_sha() {
        let commit = sample_commit();
        assert_eq!(commit.short_sha(), "1945ab9");
    }

    #[test]
    fn test_short_sha_handles_short_input() {
        let mut commit = sample_commit();
        commit.sha = "abc".to_string();
        assert_eq!(commit.short_sha(), "abc");
    }

    #[test]
    fn test_merge_and_root() {
        let mut commit = sample_commit();
        assert!(!commit.is_merge());
        assert!(!commit.is_root());

        commit.parents.push("b".repeat(40));
        assert!(commit.is_merge());

        commit.parents.clear();
        assert!(commit.is_root());
    }

    #[test]
    fn test_subject() {
        let mut commit = sample_commit();
        assert_eq!(commit.subject(), "Add milestone filter");
        commit.message = String::new();
        assert_eq!(commit.subject(), "");
    }

    #[test]
    fn test_timestamp_is_committer_time() {
        let mut commit = sample_commit();
        let later = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        commit.committer.when = later;
        assert_eq!(commit.timestamp(), later);
    }
}
