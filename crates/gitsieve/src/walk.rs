// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Walk controller
//!
//! A walk feeds commits from a [`CommitGraph`] to the root of a filter tree
//! in traversal order and ends when a verdict requests a stop or the
//! history is exhausted.

use gitsieve_git::{CommitGraph, GitError, WalkOptions};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::SieveError;
use crate::filter::{Filter, WalkContext};

/// How a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkStatus {
    /// Every commit the source produced was visited
    Exhausted,
    /// A verdict requested a stop
    Stopped,
}

/// Summary of one walk
///
/// Filter results are read from the filters themselves; this only records
/// how far the walk went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkOutcome {
    /// How the walk ended
    pub status: WalkStatus,
    /// Commits handed to the root filter
    pub visited: usize,
    /// Commits the root filter matched
    pub matched: usize,
    /// SHA of the commit whose verdict requested the stop
    pub stopped_at: Option<String>,
}

impl WalkOutcome {
    /// Whether the walk ended on a stop request
    #[must_use]
    pub fn stopped(&self) -> bool {
        self.status == WalkStatus::Stopped
    }
}

/// Drives walks over a commit graph
#[derive(Debug)]
pub struct CommitWalker<'g, G> {
    graph: &'g G,
    options: WalkOptions,
}

impl<'g, G: CommitGraph> CommitWalker<'g, G> {
    /// Walk from `HEAD` with default options
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            options: WalkOptions::default(),
        }
    }

    /// Choose the starting point, order and bound of the traversal
    #[must_use]
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Configured traversal options
    #[must_use]
    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Run one session of `filter` over the configured history
    ///
    /// `filter` is reset once, then sees each commit in order. The walk
    /// ends right after the first commit whose verdict requests a stop.
    /// The same walker can run any number of sessions.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the commit source or by a filter.
    /// State the filters accumulated up to that point stays readable.
    pub fn walk<F: Filter + ?Sized>(&self, filter: &mut F) -> Result<WalkOutcome, SieveError> {
        debug!(start = %self.options.start(), limit = ?self.options.limit, "Starting walk");
        filter.reset();

        let mut ctx = WalkContext::new(self.graph);
        let mut matched = 0;
        for commit in self.graph.commits(&self.options)? {
            let commit = commit?;
            ctx.advance();
            let verdict = filter.include(&ctx, &commit)?;
            if verdict.matched {
                matched += 1;
            }
            if verdict.stop {
                debug!(sha = %commit.sha, visited = ctx.visited(), matched, "Walk stopped");
                return Ok(WalkOutcome {
                    status: WalkStatus::Stopped,
                    visited: ctx.visited(),
                    matched,
                    stopped_at: Some(commit.sha),
                });
            }
        }

        debug!(visited = ctx.visited(), matched, "Walk exhausted");
        Ok(WalkOutcome {
            status: WalkStatus::Exhausted,
            visited: ctx.visited(),
            matched,
            stopped_at: None,
        })
    }
}

/// One unit of work for [`walk_parallel`]
pub struct Session<'f> {
    /// Traversal options for this session
    pub options: WalkOptions,
    /// Root of the filter tree this session runs
    pub filter: Box<dyn Filter + 'f>,
}

impl<'f> Session<'f> {
    /// Pair `options` with a filter tree
    ///
    /// Pass `&mut tree` to keep ownership of the tree and read its leaves
    /// after the walk.
    pub fn new(options: WalkOptions, filter: impl Filter + 'f) -> Self {
        Self {
            options,
            filter: Box::new(filter),
        }
    }
}

/// Run independent sessions on the rayon pool
///
/// Each task opens its own graph handle through `open`, since on-disk
/// repository handles cannot be shared across threads. Results come back
/// in the order of `sessions`.
pub fn walk_parallel<G, O>(
    open: O,
    sessions: Vec<Session<'_>>,
) -> Vec<Result<WalkOutcome, SieveError>>
where
    G: CommitGraph,
    O: Fn() -> Result<G, GitError> + Sync,
{
    debug!(sessions = sessions.len(), "Starting parallel walks");
    sessions
        .into_par_iter()
        .map(|mut session| {
            let graph = open()?;
            CommitWalker::new(&graph)
                .with_options(session.options)
                .walk(&mut session.filter)
        })
        .collect()
}
