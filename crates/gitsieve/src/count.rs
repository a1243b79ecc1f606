// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Aggregating filters: counting, collecting, limiting

use gitsieve_git::Commit;

use crate::error::SieveError;
use crate::filter::{Filter, StopPolicy, Verdict, WalkContext};

/// Whether accumulated state survives [`Filter::reset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountScope {
    /// Keep accumulating across walks; only [`CountFilter::clear`] empties it
    #[default]
    Persistent,
    /// Start from zero at the beginning of every walk
    PerWalk,
}

/// Counts the commits it sees and always matches
///
/// Placed after other filters in an [`AndFilter`](crate::AndFilter), it
/// counts the commits those filters let through.
#[derive(Debug, Default)]
pub struct CountFilter {
    count: u64,
    scope: CountScope,
    stop: StopPolicy,
}

impl CountFilter {
    /// A persistent counter starting at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter cleared at the start of every walk
    #[must_use]
    pub fn per_walk() -> Self {
        Self {
            scope: CountScope::PerWalk,
            ..Self::default()
        }
    }

    /// Set the stop policy
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    /// Commits counted so far
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Configured scope
    #[must_use]
    pub fn scope(&self) -> CountScope {
        self.scope
    }

    /// Set the count back to zero
    pub fn clear(&mut self) {
        self.count = 0;
    }
}

/// Clones start counting from zero; only the scope and stop policy carry over.
impl Clone for CountFilter {
    fn clone(&self) -> Self {
        Self {
            count: 0,
            scope: self.scope,
            stop: self.stop,
        }
    }
}

impl Filter for CountFilter {
    fn include(&mut self, _: &WalkContext<'_>, _: &Commit) -> Result<Verdict, SieveError> {
        self.count += 1;
        Ok(self.stop.verdict(true))
    }

    fn reset(&mut self) {
        if self.scope == CountScope::PerWalk {
            self.clear();
        }
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

/// Records the SHA of every commit it sees and always matches
#[derive(Debug, Default)]
pub struct CommitListFilter {
    commits: Vec<String>,
    scope: CountScope,
    stop: StopPolicy,
}

impl CommitListFilter {
    /// A persistent list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A list cleared at the start of every walk
    #[must_use]
    pub fn per_walk() -> Self {
        Self {
            scope: CountScope::PerWalk,
            ..Self::default()
        }
    }

    /// Set the stop policy
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    /// SHAs in the order they were seen
    #[must_use]
    pub fn commits(&self) -> &[String] {
        &self.commits
    }

    /// Forget every recorded SHA
    pub fn clear(&mut self) {
        self.commits.clear();
    }
}

/// Clones start with an empty list.
impl Clone for CommitListFilter {
    fn clone(&self) -> Self {
        Self {
            commits: Vec::new(),
            scope: self.scope,
            stop: self.stop,
        }
    }
}

impl Filter for CommitListFilter {
    fn include(&mut self, _: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        self.commits.push(commit.sha.clone());
        Ok(self.stop.verdict(true))
    }

    fn reset(&mut self) {
        if self.scope == CountScope::PerWalk {
            self.clear();
        }
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

/// Matches the first `limit` commits it sees in a walk
///
/// The next commit after that is rejected with a stop request. The position
/// is walk-scoped: [`Filter::reset`] rewinds it, and a fresh filter behaves
/// as if it had just been reset.
#[derive(Debug, Clone)]
pub struct LimitFilter {
    limit: usize,
    seen: usize,
}

impl LimitFilter {
    /// Match at most `limit` commits per walk
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }

    /// Configured limit
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Commits matched in the current walk
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl Filter for LimitFilter {
    fn include(&mut self, _: &WalkContext<'_>, _: &Commit) -> Result<Verdict, SieveError> {
        if self.seen >= self.limit {
            return Ok(StopPolicy::OnMiss.verdict(false));
        }
        self.seen += 1;
        Ok(Verdict::INCLUDE)
    }

    fn reset(&mut self) {
        self.seen = 0;
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(Self::new(self.limit))
    }
}
