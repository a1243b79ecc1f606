// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Diff-driven filtering
//!
//! [`DiffFilter`] computes each commit's path-level changes and hands them
//! to a [`DiffObserver`], whose answer becomes the filter's match result.
//! Pairing it with [`StopPolicy::Always`] gives "inspect the newest commit's
//! diff, then stop".

use std::fmt;

use gitsieve_git::{Commit, DiffEntry, DiffOptions};

use crate::error::SieveError;
use crate::filter::{Filter, StopPolicy, Verdict, WalkContext};

/// Receives each commit's diff and decides whether the commit matches
pub trait DiffObserver: Send {
    /// Inspect `diffs` for `commit`; the return value is the match result
    fn on_diff(&mut self, commit: &Commit, diffs: &[DiffEntry]) -> bool;
}

impl<F> DiffObserver for F
where
    F: FnMut(&Commit, &[DiffEntry]) -> bool + Send,
{
    fn on_diff(&mut self, commit: &Commit, diffs: &[DiffEntry]) -> bool {
        self(commit, diffs)
    }
}

/// Observer that keeps every diff it is shown and matches every commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectDiffs {
    collected: Vec<(String, Vec<DiffEntry>)>,
}

impl CollectDiffs {
    /// `(commit sha, entries)` pairs in walk order
    #[must_use]
    pub fn collected(&self) -> &[(String, Vec<DiffEntry>)] {
        &self.collected
    }

    /// Entries of the most recently observed commit
    #[must_use]
    pub fn latest(&self) -> Option<&[DiffEntry]> {
        self.collected.last().map(|(_, entries)| entries.as_slice())
    }
}

impl DiffObserver for CollectDiffs {
    fn on_diff(&mut self, commit: &Commit, diffs: &[DiffEntry]) -> bool {
        self.collected.push((commit.sha.clone(), diffs.to_vec()));
        true
    }
}

/// Matches commits whose diff satisfies an observer
///
/// Root commits are diffed against the empty tree, so every path shows up
/// as an addition with no parent.
#[derive(Clone)]
pub struct DiffFilter<O = CollectDiffs> {
    observer: O,
    options: DiffOptions,
    stop: StopPolicy,
}

impl DiffFilter<CollectDiffs> {
    /// A filter recording every diff it sees
    #[must_use]
    pub fn collecting() -> Self {
        Self::new(CollectDiffs::default())
    }

    /// `(commit sha, entries)` pairs recorded so far
    #[must_use]
    pub fn collected(&self) -> &[(String, Vec<DiffEntry>)] {
        self.observer.collected()
    }
}

impl<O: DiffObserver> DiffFilter<O> {
    /// Feed diffs against the first parent to `observer`
    #[must_use]
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            options: DiffOptions::default(),
            stop: StopPolicy::Never,
        }
    }

    /// Choose parents and rename detection
    #[must_use]
    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the stop policy
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    /// The observer
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Take the observer back out
    #[must_use]
    pub fn into_observer(self) -> O {
        self.observer
    }
}

impl<O> fmt::Debug for DiffFilter<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffFilter")
            .field("options", &self.options)
            .field("stop", &self.stop)
            .finish_non_exhaustive()
    }
}

impl<O> Filter for DiffFilter<O>
where
    O: DiffObserver + Clone + 'static,
{
    fn include(&mut self, ctx: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        let diffs = ctx.diff(commit, &self.options)?;
        let matched = self.observer.on_diff(commit, &diffs);
        Ok(self.stop.verdict(matched))
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}
