// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Collaborator traits consumed by the filter engine
//!
//! The engine only ever iterates commits forward and asks for diffs on
//! demand. Anything that can do both is a [`CommitGraph`].

use crate::commit::Commit;
use crate::diff::{DiffEntry, DiffOptions};
use crate::error::GitError;
use crate::repo::WalkOptions;

/// Lazy, ordered, fallible sequence of commits
pub type Commits<'a> = Box<dyn Iterator<Item = Result<Commit, GitError>> + 'a>;

/// Supplies commits in traversal order
pub trait CommitSource {
    /// Start a traversal described by `options`
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if the starting point cannot be
    /// resolved. Errors reading individual commits surface through the
    /// iterator.
    fn commits(&self, options: &WalkOptions) -> Result<Commits<'_>, GitError>;
}

/// Computes path-level changes for a commit
pub trait DiffSource {
    /// Diff `commit` against the parent(s) selected in `options`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the commit, its parents, or their trees cannot
    /// be read.
    fn diff(&self, commit: &Commit, options: &DiffOptions) -> Result<Vec<DiffEntry>, GitError>;
}

/// A source of both commits and diffs
pub trait CommitGraph: CommitSource + DiffSource {}

impl<T: CommitSource + DiffSource + ?Sized> CommitGraph for T {}

impl<T: CommitSource + ?Sized> CommitSource for &T {
    fn commits(&self, options: &WalkOptions) -> Result<Commits<'_>, GitError> {
        (**self).commits(options)
    }
}

impl<T: DiffSource + ?Sized> DiffSource for &T {
    fn diff(&self, commit: &Commit, options: &DiffOptions) -> Result<Vec<DiffEntry>, GitError> {
        (**self).diff(commit, options)
    }
}
