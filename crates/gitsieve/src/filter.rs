// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The filter contract
//!
//! Every predicate in a filter tree implements [`Filter`]. A filter sees one
//! commit at a time and answers with a [`Verdict`]: whether the commit
//! matched, and whether the walk should stop after this commit.

use gitsieve_git::{Commit, DiffEntry, DiffOptions, DiffSource};

use crate::error::SieveError;

/// Result of evaluating a filter against one commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdict {
    /// The commit satisfies the filter
    pub matched: bool,
    /// The walk should end after this commit
    pub stop: bool,
}

impl Verdict {
    /// Matched, keep walking
    pub const INCLUDE: Self = Self::new(true, false);
    /// Not matched, keep walking
    pub const EXCLUDE: Self = Self::new(false, false);

    /// Build a verdict from its parts
    #[must_use]
    pub const fn new(matched: bool, stop: bool) -> Self {
        Self { matched, stop }
    }

    /// Same verdict, with `stop` OR-ed into the stop request
    #[must_use]
    pub const fn or_stop(self, stop: bool) -> Self {
        Self::new(self.matched, self.stop || stop)
    }
}

/// When a filter asks the walk to end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopPolicy {
    /// Never request a stop
    #[default]
    Never,
    /// Stop after the first commit the filter matches
    OnMatch,
    /// Stop after the first commit the filter rejects
    OnMiss,
    /// Stop after the first commit the filter evaluates
    Always,
}

impl StopPolicy {
    /// Whether an evaluation with result `matched` requests a stop
    #[must_use]
    pub const fn triggers(self, matched: bool) -> bool {
        match self {
            Self::Never => false,
            Self::OnMatch => matched,
            Self::OnMiss => !matched,
            Self::Always => true,
        }
    }

    /// Verdict for a leaf filter whose predicate returned `matched`
    #[must_use]
    pub const fn verdict(self, matched: bool) -> Verdict {
        Verdict::new(matched, self.triggers(matched))
    }
}

/// Per-session view handed to filters
///
/// Gives on-demand access to commit diffs and the walk position.
pub struct WalkContext<'w> {
    diffs: &'w dyn DiffSource,
    visited: usize,
}

impl<'w> WalkContext<'w> {
    /// Context reading diffs from `diffs`
    pub fn new(diffs: &'w dyn DiffSource) -> Self {
        Self { diffs, visited: 0 }
    }

    /// Diff `commit` against the parents selected by `options`
    ///
    /// # Errors
    ///
    /// Propagates repository errors from the diff collaborator.
    pub fn diff(
        &self,
        commit: &Commit,
        options: &DiffOptions,
    ) -> Result<Vec<DiffEntry>, SieveError> {
        Ok(self.diffs.diff(commit, options)?)
    }

    /// Commits handed to the root filter so far, including the current one
    #[must_use]
    pub fn visited(&self) -> usize {
        self.visited
    }

    pub(crate) fn advance(&mut self) {
        self.visited += 1;
    }
}

/// A predicate over a single commit
///
/// Filters may keep state (counters, captured diffs). A walk calls
/// [`reset`](Filter::reset) once before the first commit, then
/// [`include`](Filter::include) once per commit until the walk ends.
///
/// Filters are `Send` so cloned trees can run on other threads. The trait
/// is implemented for `&mut F`, which lets a caller lend a leaf to a tree
/// for one walk and read its state once the tree is dropped.
pub trait Filter: Send {
    /// Evaluate `commit`
    ///
    /// # Errors
    ///
    /// Returns an error when the filter cannot evaluate the commit, typically
    /// because a diff could not be read. The walk aborts on error.
    fn include(&mut self, ctx: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError>;

    /// Clear per-walk state. Must be idempotent.
    fn reset(&mut self) {}

    /// Independent copy sharing no mutable state with `self`
    fn clone_filter(&self) -> Box<dyn Filter>;
}

impl<F: Filter + ?Sized> Filter for &mut F {
    fn include(&mut self, ctx: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        (**self).include(ctx, commit)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        (**self).clone_filter()
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn include(&mut self, ctx: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        (**self).include(ctx, commit)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        (**self).clone_filter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_policy_triggers() {
        assert!(!StopPolicy::Never.triggers(true));
        assert!(!StopPolicy::Never.triggers(false));
        assert!(StopPolicy::OnMatch.triggers(true));
        assert!(!StopPolicy::OnMatch.triggers(false));
        assert!(!StopPolicy::OnMiss.triggers(true));
        assert!(StopPolicy::OnMiss.triggers(false));
        assert!(StopPolicy::Always.triggers(true));
        assert!(StopPolicy::Always.triggers(false));
    }

    #[test]
    fn test_verdict_helpers() {
        assert_eq!(StopPolicy::OnMiss.verdict(false), Verdict::new(false, true));
        assert_eq!(Verdict::INCLUDE.or_stop(true), Verdict::new(true, true));
        assert_eq!(Verdict::EXCLUDE.or_stop(false), Verdict::EXCLUDE);
        assert_eq!(Verdict::default(), Verdict::EXCLUDE);
    }
}
