// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitsieve: composable commit filters over git history
//!
//! Build a tree of [`Filter`]s with [`AndFilter`], [`OrFilter`] and
//! [`NotFilter`], then hand its root to a [`CommitWalker`]. Each commit is
//! evaluated once; a [`Verdict`] says whether it matched and whether the
//! walk should stop there. Results live in the leaf filters, which can be
//! lent to a tree by `&mut` and read back after the walk.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitsieve::prelude::*;
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! let me = Identity::new("Test user", "test@user.com");
//!
//! let mut signed = CountFilter::new();
//! let mut tree = AndFilter::of(TrailerFilter::signed_off_by(&me).expect("valid identity"))
//!     .and(&mut signed);
//!
//! let outcome = CommitWalker::new(&repo)
//!     .with_options(WalkOptions::latest(500))
//!     .walk(&mut tree)
//!     .expect("walk");
//! drop(tree);
//! println!("{} of {} commits signed off", signed.count(), outcome.visited);
//! ```

pub mod combinator;
pub mod count;
pub mod date;
pub mod diff;
pub mod error;
pub mod filter;
pub mod message;
pub mod person;
pub mod walk;

#[cfg(test)]
mod testing;

pub use combinator::{AndFilter, NotFilter, OrFilter};
pub use count::{CommitListFilter, CountFilter, CountScope, LimitFilter};
pub use date::{DateFilter, ParentCountFilter};
pub use diff::{CollectDiffs, DiffFilter, DiffObserver};
pub use error::SieveError;
pub use filter::{Filter, StopPolicy, Verdict, WalkContext};
pub use message::{MessageFilter, SIGNED_OFF_BY, TrailerFilter};
pub use person::{PersonFilter, Role};
pub use walk::{CommitWalker, Session, WalkOutcome, WalkStatus, walk_parallel};

pub use gitsieve_git::{
    ChangeType, Commit, CommitGraph, CommitOrder, DiffEntry, DiffOptions, GitError, GitRepo,
    Identity, MemoryRepo, ParentSelection, WalkOptions,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::combinator::{AndFilter, NotFilter, OrFilter};
    pub use crate::count::{CommitListFilter, CountFilter, LimitFilter};
    pub use crate::diff::DiffFilter;
    pub use crate::error::SieveError;
    pub use crate::filter::{Filter, StopPolicy, Verdict};
    pub use crate::message::{MessageFilter, TrailerFilter};
    pub use crate::person::PersonFilter;
    pub use crate::walk::{CommitWalker, WalkOutcome};
    pub use gitsieve_git::{Commit, DiffEntry, DiffOptions, GitRepo, Identity, WalkOptions};
}
