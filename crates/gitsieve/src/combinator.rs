// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Boolean combinators
//!
//! [`AndFilter`] and [`OrFilter`] evaluate children in registration order
//! and short-circuit; [`NotFilter`] inverts a single child. Combinators own
//! their children, and [`Filter::clone_filter`] deep-clones the whole tree.
//!
//! Stop propagation follows whichever child decided the outcome: on a
//! short-circuit, the stop request of the child that short-circuited; when
//! every child had to be evaluated, the stop request of any of them. A
//! combinator's own [`StopPolicy`] is applied to its result on top.

use gitsieve_git::Commit;
use tracing::trace;

use crate::error::SieveError;
use crate::filter::{Filter, StopPolicy, Verdict, WalkContext};

/// Matches commits every child matches
pub struct AndFilter<'a> {
    children: Vec<Box<dyn Filter + 'a>>,
    stop: StopPolicy,
}

impl<'a> AndFilter<'a> {
    /// Build from a list of children
    ///
    /// # Errors
    ///
    /// Returns `SieveError::EmptyCombinator` if `children` is empty.
    pub fn new(children: Vec<Box<dyn Filter + 'a>>) -> Result<Self, SieveError> {
        if children.is_empty() {
            return Err(SieveError::EmptyCombinator { kind: "AND" });
        }
        Ok(Self {
            children,
            stop: StopPolicy::Never,
        })
    }

    /// Start a conjunction with its first child
    #[must_use]
    pub fn of(first: impl Filter + 'a) -> Self {
        Self {
            children: vec![Box::new(first)],
            stop: StopPolicy::Never,
        }
    }

    /// Append a child, evaluated after the existing ones
    #[must_use]
    pub fn and(mut self, next: impl Filter + 'a) -> Self {
        self.children.push(Box::new(next));
        self
    }

    /// Set the stop policy applied to the combined result
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    /// Number of children
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether there are no children; never true for a built combinator
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Filter for AndFilter<'_> {
    fn include(&mut self, ctx: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        let mut stop = false;
        for (position, child) in self.children.iter_mut().enumerate() {
            let verdict = child.include(ctx, commit)?;
            if !verdict.matched {
                trace!(sha = %commit.short_sha(), position, "AND short-circuited");
                return Ok(verdict.or_stop(self.stop.triggers(false)));
            }
            stop |= verdict.stop;
        }
        Ok(Verdict::new(true, stop || self.stop.triggers(true)))
    }

    fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(AndFilter {
            children: self.children.iter().map(|c| c.clone_filter()).collect(),
            stop: self.stop,
        })
    }
}

/// Matches commits any child matches
pub struct OrFilter<'a> {
    children: Vec<Box<dyn Filter + 'a>>,
    stop: StopPolicy,
}

impl<'a> OrFilter<'a> {
    /// Build from a list of children
    ///
    /// # Errors
    ///
    /// Returns `SieveError::EmptyCombinator` if `children` is empty.
    pub fn new(children: Vec<Box<dyn Filter + 'a>>) -> Result<Self, SieveError> {
        if children.is_empty() {
            return Err(SieveError::EmptyCombinator { kind: "OR" });
        }
        Ok(Self {
            children,
            stop: StopPolicy::Never,
        })
    }

    /// Start a disjunction with its first child
    #[must_use]
    pub fn of(first: impl Filter + 'a) -> Self {
        Self {
            children: vec![Box::new(first)],
            stop: StopPolicy::Never,
        }
    }

    /// Append a child, evaluated after the existing ones
    #[must_use]
    pub fn or(mut self, next: impl Filter + 'a) -> Self {
        self.children.push(Box::new(next));
        self
    }

    /// Set the stop policy applied to the combined result
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    /// Number of children
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether there are no children; never true for a built combinator
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Filter for OrFilter<'_> {
    fn include(&mut self, ctx: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        let mut stop = false;
        for (position, child) in self.children.iter_mut().enumerate() {
            let verdict = child.include(ctx, commit)?;
            if verdict.matched {
                trace!(sha = %commit.short_sha(), position, "OR short-circuited");
                return Ok(verdict.or_stop(self.stop.triggers(true)));
            }
            stop |= verdict.stop;
        }
        Ok(Verdict::new(false, stop || self.stop.triggers(false)))
    }

    fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(OrFilter {
            children: self.children.iter().map(|c| c.clone_filter()).collect(),
            stop: self.stop,
        })
    }
}

/// Inverts its child's match result
///
/// The child is still evaluated for every commit, so its side effects
/// (counting, diff capture) happen regardless of the inversion. A stop
/// requested by the child passes through unchanged.
pub struct NotFilter<'a> {
    child: Box<dyn Filter + 'a>,
    stop: StopPolicy,
}

impl<'a> NotFilter<'a> {
    /// Negate `child`
    #[must_use]
    pub fn new(child: impl Filter + 'a) -> Self {
        Self {
            child: Box::new(child),
            stop: StopPolicy::Never,
        }
    }

    /// Set the stop policy applied to the negated result
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }
}

impl Filter for NotFilter<'_> {
    fn include(&mut self, ctx: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        let verdict = self.child.include(ctx, commit)?;
        let matched = !verdict.matched;
        Ok(Verdict::new(matched, verdict.stop || self.stop.triggers(matched)))
    }

    fn reset(&mut self) {
        self.child.reset();
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(NotFilter {
            child: self.child.clone_filter(),
            stop: self.stop,
        })
    }
}
