// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitsieve

use gitsieve_git::GitError;
use thiserror::Error;

/// Errors raised while building filter trees or walking commits
#[derive(Debug, Error)]
pub enum SieveError {
    /// Reading commits or diffs from the repository failed
    #[error(transparent)]
    Git(#[from] GitError),

    /// A combinator was built without any child filter
    #[error("{kind} filter requires at least one child")]
    EmptyCombinator {
        /// Combinator kind (`AND`, `OR`)
        kind: &'static str,
    },

    /// An identity to match against is empty or malformed
    #[error("Invalid identity: {value:?}")]
    InvalidIdentity {
        /// The offending name or email
        value: String,
    },

    /// A message pattern failed to compile
    #[error("Invalid message pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A filter was configured with contradictory settings
    #[error("Invalid filter configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}
