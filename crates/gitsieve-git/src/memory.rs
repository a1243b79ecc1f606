// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! In-memory commit graph
//!
//! [`MemoryRepo`] records commits and their per-parent diffs directly, with
//! no object store behind it. It is `Sync`, so a single instance can back
//! any number of concurrent walks; tests and benchmarks use it to drive the
//! filter engine without touching disk.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::commit::{Commit, Identity};
use crate::diff::{DiffEntry, DiffOptions};
use crate::error::GitError;
use crate::graph::{CommitSource, Commits, DiffSource};
use crate::repo::{CommitOrder, WalkOptions};

const DEFAULT_BRANCH: &str = "master";

/// A commit graph held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryRepo {
    /// Commits in creation order; parents always precede children
    commits: Vec<Commit>,
    index: HashMap<String, usize>,
    /// Changes keyed by (commit sha, parent position)
    diffs: HashMap<(String, usize), Vec<DiffEntry>>,
    /// Changes of root commits
    root_diffs: HashMap<String, Vec<DiffEntry>>,
    branches: HashMap<String, String>,
    head: String,
    author: Identity,
    clock: DateTime<Utc>,
}

impl Default for MemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepo {
    /// Create an empty repository on branch `master`
    #[must_use]
    pub fn new() -> Self {
        Self {
            commits: Vec::new(),
            index: HashMap::new(),
            diffs: HashMap::new(),
            root_diffs: HashMap::new(),
            branches: HashMap::new(),
            head: DEFAULT_BRANCH.to_string(),
            author: Identity::new("Test User", "test@user.com"),
            clock: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().unwrap_or_default(),
        }
    }

    /// Author and committer used for subsequent commits
    #[must_use]
    pub fn with_author(mut self, author: Identity) -> Self {
        self.author = author;
        self
    }

    /// Number of commits recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether no commit has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Name of the checked-out branch
    #[must_use]
    pub fn current_branch(&self) -> &str {
        &self.head
    }

    /// Record a commit on the current branch and return its SHA
    ///
    /// `changes` are the entries reported when diffing against the first
    /// parent (or, for the first commit, against the empty tree).
    pub fn commit(&mut self, message: &str, changes: Vec<DiffEntry>) -> String {
        let author = self.author.clone();
        self.commit_as(author, message, changes)
    }

    /// Record a commit authored by `author`
    pub fn commit_as(
        &mut self,
        author: Identity,
        message: &str,
        changes: Vec<DiffEntry>,
    ) -> String {
        let parents: Vec<String> = self.branch_tip().into_iter().collect();
        self.record(author, message, parents, vec![changes])
    }

    /// Record a merge of `other` (branch name or SHA) into the current branch
    ///
    /// `changes` holds one entry list per parent: first the current tip,
    /// then `other`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if `other` or the current branch
    /// does not resolve to a commit.
    pub fn merge(
        &mut self,
        other: &str,
        message: &str,
        changes: [Vec<DiffEntry>; 2],
    ) -> Result<String, GitError> {
        let ours = self.branch_tip().ok_or_else(|| GitError::InvalidReference {
            reference: self.head.clone(),
        })?;
        let theirs = self.resolve(other)?;
        let author = self.author.clone();
        Ok(self.record(author, message, vec![ours, theirs], changes.into()))
    }

    /// Create a branch at the current tip and check it out
    pub fn branch(&mut self, name: &str) {
        if let Some(tip) = self.branch_tip() {
            self.branches.insert(name.to_string(), tip);
        }
        self.head = name.to_string();
    }

    /// Switch the current branch
    pub fn checkout(&mut self, name: &str) {
        self.head = name.to_string();
    }

    fn branch_tip(&self) -> Option<String> {
        self.branches.get(&self.head).cloned()
    }

    fn record(
        &mut self,
        author: Identity,
        message: &str,
        parents: Vec<String>,
        changes: Vec<Vec<DiffEntry>>,
    ) -> String {
        let position = self.commits.len();
        let sha = format!("{:040x}", position + 1);
        self.clock += Duration::minutes(1);
        let author = author.at(self.clock);

        for (parent_index, entries) in changes.into_iter().enumerate() {
            let parent = parents.get(parent_index).cloned();
            let entries = entries
                .into_iter()
                .map(|mut entry| {
                    entry.parent = parent.clone();
                    entry
                })
                .collect();
            if parent.is_some() {
                self.diffs.insert((sha.clone(), parent_index), entries);
            } else {
                self.root_diffs.insert(sha.clone(), entries);
            }
        }

        self.commits.push(Commit {
            sha: sha.clone(),
            tree: format!("{:040x}", u64::MAX - position as u64),
            committer: author.clone(),
            author,
            message: message.to_string(),
            parents,
        });
        self.index.insert(sha.clone(), position);
        self.branches.insert(self.head.clone(), sha.clone());
        sha
    }

    fn resolve(&self, reference: &str) -> Result<String, GitError> {
        let sha = if reference == "HEAD" {
            self.branch_tip()
        } else if let Some(tip) = self.branches.get(reference) {
            Some(tip.clone())
        } else {
            self.index.contains_key(reference).then(|| reference.to_string())
        };
        sha.ok_or_else(|| GitError::InvalidReference {
            reference: reference.to_string(),
        })
    }

    fn reachable(&self, start: &str, first_parent: bool) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut pending = vec![start.to_string()];
        while let Some(sha) = pending.pop() {
            let Some(&position) = self.index.get(&sha) else {
                continue;
            };
            if !seen.insert(position) {
                continue;
            }
            let parents = &self.commits[position].parents;
            let followed = if first_parent {
                &parents[..parents.len().min(1)]
            } else {
                &parents[..]
            };
            pending.extend(followed.iter().cloned());
        }
        seen
    }
}

impl CommitSource for MemoryRepo {
    fn commits(&self, options: &WalkOptions) -> Result<Commits<'_>, GitError> {
        let start = self.resolve(options.start())?;
        let reachable = self.reachable(&start, options.first_parent);

        // Creation order is already a valid topological order.
        let mut ordered: Vec<&Commit> = self
            .commits
            .iter()
            .enumerate()
            .filter(|(position, _)| reachable.contains(position))
            .map(|(_, commit)| commit)
            .collect();
        match options.order {
            CommitOrder::Topological => ordered.reverse(),
            CommitOrder::Time => {
                ordered.reverse();
                ordered.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
            }
            CommitOrder::Reverse => {}
        }

        let limit = options.limit.unwrap_or(usize::MAX);
        Ok(Box::new(ordered.into_iter().take(limit).cloned().map(Ok)))
    }
}

impl DiffSource for MemoryRepo {
    fn diff(&self, commit: &Commit, options: &DiffOptions) -> Result<Vec<DiffEntry>, GitError> {
        if !self.index.contains_key(&commit.sha) {
            return Err(GitError::CommitNotFound {
                sha: commit.sha.clone(),
            });
        }

        let indices = options.parent_indices(commit.parents.len());
        if indices.is_empty() {
            return Ok(self.root_diffs.get(&commit.sha).cloned().unwrap_or_default());
        }

        let mut entries = Vec::new();
        for index in indices {
            if index >= commit.parents.len() {
                return Err(GitError::ParentOutOfRange {
                    sha: commit.sha.clone(),
                    index,
                    parents: commit.parents.len(),
                });
            }
            if let Some(recorded) = self.diffs.get(&(commit.sha.clone(), index)) {
                entries.extend(recorded.iter().cloned());
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeType;
    use similar_asserts::assert_eq;

    fn shas(repo: &MemoryRepo, options: &WalkOptions) -> Vec<String> {
        repo.commits(options)
            .expect("walk")
            .map(|c| c.expect("commit").sha)
            .collect()
    }

    #[test]
    fn test_linear_history_newest_first() {
        let mut repo = MemoryRepo::new();
        let a = repo.commit("a", vec![DiffEntry::added("a.txt", None)]);
        let b = repo.commit("b", vec![DiffEntry::modified("a.txt", None)]);

        assert_eq!(shas(&repo, &WalkOptions::default()), vec![b.clone(), a.clone()]);
        let reverse = WalkOptions::default().with_order(CommitOrder::Reverse);
        assert_eq!(shas(&repo, &reverse), vec![a, b]);
    }

    #[test]
    fn test_limit_bounds_walk() {
        let mut repo = MemoryRepo::new();
        for i in 0..5 {
            repo.commit(&format!("commit {i}"), vec![]);
        }
        assert_eq!(shas(&repo, &WalkOptions::latest(2)).len(), 2);
    }

    #[test]
    fn test_merge_history() {
        let mut repo = MemoryRepo::new();
        let base = repo.commit("base", vec![DiffEntry::added("test.txt", None)]);
        repo.branch("test");
        let side = repo.commit("side", vec![DiffEntry::modified("test.txt", None)]);
        repo.checkout("master");
        let main = repo.commit("main", vec![DiffEntry::modified("test.txt", None)]);
        let merge = repo
            .merge(
                "test",
                "merge",
                [
                    vec![DiffEntry::modified("test.txt", None)],
                    vec![DiffEntry::modified("test.txt", None)],
                ],
            )
            .expect("merge");

        let walked = shas(&repo, &WalkOptions::default());
        assert_eq!(walked.first(), Some(&merge));
        assert_eq!(walked.len(), 4);
        assert_eq!(walked.last(), Some(&base));

        let first_parent = shas(&repo, &WalkOptions::default().first_parent_only());
        assert_eq!(first_parent, vec![merge.clone(), main.clone(), base]);

        let commit = repo.commits(&WalkOptions::latest(1)).expect("walk").next();
        let commit = commit.expect("some").expect("ok");
        let diffs = repo.diff(&commit, &DiffOptions::default()).expect("diff");
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].parent.as_deref(), Some(main.as_str()));

        let all = repo
            .diff(&commit, &DiffOptions::default().all_parents())
            .expect("diff");
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].parent.as_deref(), Some(side.as_str()));
    }

    #[test]
    fn test_root_diff_has_no_parent() {
        let mut repo = MemoryRepo::new();
        repo.commit("root", vec![DiffEntry::added("test.txt", None)]);
        let commit = repo.commits(&WalkOptions::default()).expect("walk").next();
        let commit = commit.expect("some").expect("ok");

        let diffs = repo.diff(&commit, &DiffOptions::default()).expect("diff");
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].change, ChangeType::Add);
        assert_eq!(diffs[0].parent, None);
    }

    #[test]
    fn test_parent_out_of_range() {
        let mut repo = MemoryRepo::new();
        repo.commit("root", vec![]);
        repo.commit("child", vec![]);
        let commit = repo.commits(&WalkOptions::default()).expect("walk").next();
        let commit = commit.expect("some").expect("ok");

        let result = repo.diff(&commit, &DiffOptions::default().parent(1));
        assert!(matches!(
            result,
            Err(GitError::ParentOutOfRange { index: 1, parents: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_reference() {
        let repo = MemoryRepo::new();
        let result = repo.commits(&WalkOptions::default());
        assert!(matches!(result, Err(GitError::InvalidReference { .. })));
    }
}
