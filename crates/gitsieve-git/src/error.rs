// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitsieve-git

use thiserror::Error;

/// Errors that can occur while reading commits or computing diffs
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },

    /// A commit handed to the diff collaborator is unknown to the repository
    #[error("Commit not found: {sha}")]
    CommitNotFound {
        /// SHA of the missing commit
        sha: String,
    },

    /// Diff requested against a parent the commit does not have
    #[error("Commit {sha} has {parents} parent(s), cannot diff against parent {index}")]
    ParentOutOfRange {
        /// SHA of the commit being diffed
        sha: String,
        /// Requested parent index
        index: usize,
        /// Number of parents the commit actually has
        parents: usize,
    },
}
