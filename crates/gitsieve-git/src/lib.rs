// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitsieve-git: commit source and diff collaborator for gitsieve
//!
//! This library crate defines the commit and diff data model consumed by the
//! `gitsieve` filter engine, the [`CommitSource`] / [`DiffSource`] traits it
//! walks through, and two implementations: [`GitRepo`] over an on-disk
//! repository and [`MemoryRepo`] held in memory.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitsieve_git::{CommitSource, DiffOptions, DiffSource, GitRepo, WalkOptions};
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! for commit in repo.commits(&WalkOptions::latest(10)).expect("walk commits") {
//!     let commit = commit.expect("read commit");
//!     let diffs = repo.diff(&commit, &DiffOptions::default()).expect("diff");
//!     println!("{} - {} ({} paths)", commit.short_sha(), commit.subject(), diffs.len());
//! }
//! ```

pub mod commit;
pub mod diff;
pub mod error;
pub mod graph;
pub mod memory;
pub mod repo;

pub use commit::{Commit, Identity};
pub use diff::{ChangeType, DiffEntry, DiffOptions, ParentSelection};
pub use error::GitError;
pub use graph::{CommitGraph, CommitSource, Commits, DiffSource};
pub use memory::MemoryRepo;
pub use repo::{CommitOrder, GitRepo, WalkOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{Commit, Identity};
    pub use crate::diff::{ChangeType, DiffEntry, DiffOptions};
    pub use crate::error::GitError;
    pub use crate::graph::{CommitGraph, CommitSource, DiffSource};
    pub use crate::repo::{GitRepo, WalkOptions};
}
