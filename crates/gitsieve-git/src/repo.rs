// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! git2-backed commit graph
//!
//! This module reads commits and computes tree diffs from an on-disk
//! repository using the `git2` crate.

use crate::commit::{Commit, Identity};
use crate::diff::{ChangeType, DiffEntry, DiffOptions};
use crate::error::GitError;
use crate::graph::{CommitSource, Commits, DiffSource};
use chrono::{DateTime, Utc};
use git2::{Delta, DiffFindOptions, Oid, Repository, Sort};
use std::path::Path;
use tracing::{debug, trace};

/// Order in which a walk yields commits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitOrder {
    /// Children before parents, ties broken by commit time (newest first)
    #[default]
    Topological,
    /// Commit time only, newest first
    Time,
    /// Oldest first
    Reverse,
}

impl CommitOrder {
    fn sort(self) -> Sort {
        match self {
            Self::Topological => Sort::TOPOLOGICAL | Sort::TIME,
            Self::Time => Sort::TIME,
            Self::Reverse => Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE,
        }
    }
}

/// Configuration for walking commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Maximum number of commits to retrieve
    pub limit: Option<usize>,
    /// Start from this commit (defaults to HEAD)
    pub from_ref: Option<String>,
    /// Traversal order
    pub order: CommitOrder,
    /// Follow only first parents
    pub first_parent: bool,
}

impl WalkOptions {
    /// Create options for walking the N most recent commits
    #[must_use]
    pub fn latest(n: usize) -> Self {
        Self {
            limit: Some(n),
            ..Default::default()
        }
    }

    /// Set the starting reference
    #[must_use]
    pub fn from(mut self, reference: &str) -> Self {
        self.from_ref = Some(reference.to_string());
        self
    }

    /// Set the traversal order
    #[must_use]
    pub fn with_order(mut self, order: CommitOrder) -> Self {
        self.order = order;
        self
    }

    /// Follow only the first parent of merge commits
    #[must_use]
    pub fn first_parent_only(mut self) -> Self {
        self.first_parent = true;
        self
    }

    /// The starting reference, `HEAD` when unset
    #[must_use]
    pub fn start(&self) -> &str {
        self.from_ref.as_deref().unwrap_or("HEAD")
    }
}

/// A git repository wrapper implementing [`CommitSource`] and [`DiffSource`]
///
/// `git2::Repository` handles are `Send` but not `Sync`: open one `GitRepo`
/// per thread when walking in parallel.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Resolve a branch, tag, or SHA to a commit
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if the reference cannot be resolved.
    pub fn find_commit(&self, reference: &str) -> Result<Commit, GitError> {
        let oid = self.resolve(reference)?;
        let git_commit = self.repo.find_commit(oid)?;
        Ok(convert_commit(&git_commit))
    }

    /// Get the HEAD commit SHA
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD cannot be resolved.
    pub fn head_sha(&self) -> Result<String, GitError> {
        Ok(self.resolve("HEAD")?.to_string())
    }

    fn resolve(&self, reference: &str) -> Result<Oid, GitError> {
        let invalid = || GitError::InvalidReference {
            reference: reference.to_string(),
        };
        let obj = self.repo.revparse_single(reference).map_err(|_| invalid())?;
        let commit = obj.peel_to_commit().map_err(|_| invalid())?;
        Ok(commit.id())
    }

    fn lookup(&self, commit: &Commit) -> Result<git2::Commit<'_>, GitError> {
        let not_found = || GitError::CommitNotFound {
            sha: commit.sha.clone(),
        };
        let oid = Oid::from_str(&commit.sha).map_err(|_| not_found())?;
        self.repo.find_commit(oid).map_err(|_| not_found())
    }

    fn diff_trees(
        &self,
        old: Option<&git2::Tree<'_>>,
        new: &git2::Tree<'_>,
        parent: Option<String>,
        options: &DiffOptions,
        out: &mut Vec<DiffEntry>,
    ) -> Result<(), GitError> {
        let mut diff = self.repo.diff_tree_to_tree(old, Some(new), None)?;
        if options.detect_renames {
            let mut find = DiffFindOptions::new();
            find.renames(true).copies(true);
            diff.find_similar(Some(&mut find))?;
        }

        for delta in diff.deltas() {
            let path_of = |file: git2::DiffFile<'_>| {
                file.path()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_else(|| DiffEntry::NO_PATH.to_string())
            };
            let old_path = path_of(delta.old_file());
            let new_path = path_of(delta.new_file());

            let entry = match delta.status() {
                Delta::Added => DiffEntry::added(new_path, parent.clone()),
                Delta::Deleted => DiffEntry::deleted(old_path, parent.clone()),
                Delta::Modified | Delta::Typechange => DiffEntry {
                    change: ChangeType::Modify,
                    old_path,
                    new_path,
                    parent: parent.clone(),
                },
                Delta::Renamed => DiffEntry::renamed(old_path, new_path, parent.clone()),
                Delta::Copied => DiffEntry {
                    change: ChangeType::Copy,
                    old_path,
                    new_path,
                    parent: parent.clone(),
                },
                status => {
                    trace!(?status, path = %new_path, "Skipping delta");
                    continue;
                }
            };
            out.push(entry);
        }
        Ok(())
    }
}

impl CommitSource for GitRepo {
    fn commits(&self, options: &WalkOptions) -> Result<Commits<'_>, GitError> {
        let start = self.resolve(options.start())?;
        debug!(from = options.start(), sha = %start, "Starting revision walk");

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(options.order.sort())?;
        if options.first_parent {
            revwalk.simplify_first_parent()?;
        }
        revwalk.push(start)?;

        let limit = options.limit.unwrap_or(usize::MAX);
        let repo = &self.repo;
        let commits = revwalk.take(limit).map(move |oid| -> Result<Commit, GitError> {
            let git_commit = repo.find_commit(oid?)?;
            Ok(convert_commit(&git_commit))
        });
        Ok(Box::new(commits))
    }
}

impl DiffSource for GitRepo {
    fn diff(&self, commit: &Commit, options: &DiffOptions) -> Result<Vec<DiffEntry>, GitError> {
        let git_commit = self.lookup(commit)?;
        let tree = git_commit.tree()?;
        let parent_count = git_commit.parent_count();

        let mut entries = Vec::new();
        let indices = options.parent_indices(parent_count);
        if indices.is_empty() {
            self.diff_trees(None, &tree, None, options, &mut entries)?;
        }
        for index in indices {
            if index >= parent_count {
                return Err(GitError::ParentOutOfRange {
                    sha: commit.sha.clone(),
                    index,
                    parents: parent_count,
                });
            }
            let parent = git_commit.parent(index)?;
            let parent_tree = parent.tree()?;
            let parent_sha = parent.id().to_string();
            self.diff_trees(Some(&parent_tree), &tree, Some(parent_sha), options, &mut entries)?;
        }

        trace!(sha = %commit.short_sha(), entries = entries.len(), "Computed diff");
        Ok(entries)
    }
}

fn convert_identity(signature: &git2::Signature<'_>) -> Identity {
    let when = DateTime::from_timestamp(signature.when().seconds(), 0).unwrap_or_else(Utc::now);
    Identity {
        name: signature.name().unwrap_or("Unknown").to_string(),
        email: signature.email().unwrap_or("").to_string(),
        when,
    }
}

fn convert_commit(git_commit: &git2::Commit<'_>) -> Commit {
    Commit {
        sha: git_commit.id().to_string(),
        tree: git_commit.tree_id().to_string(),
        author: convert_identity(&git_commit.author()),
        committer: convert_identity(&git_commit.committer()),
        message: git_commit.message().unwrap_or("").to_string(),
        parents: git_commit.parent_ids().map(|id| id.to_string()).collect(),
    }
}
