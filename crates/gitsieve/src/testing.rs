//! Shared helpers for unit tests

use gitsieve_git::{Commit, CommitSource, DiffEntry, MemoryRepo, WalkOptions};

use crate::error::SieveError;
use crate::filter::{Filter, StopPolicy, Verdict, WalkContext};

/// Filter with a fixed answer that counts how often it was asked
#[derive(Debug, Clone)]
pub(crate) struct Fixed {
    pub matched: bool,
    pub stop: StopPolicy,
    pub calls: usize,
    pub resets: usize,
}

impl Fixed {
    pub fn new(matched: bool) -> Self {
        Self {
            matched,
            stop: StopPolicy::Never,
            calls: 0,
            resets: 0,
        }
    }

    pub fn stopping(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }
}

impl Filter for Fixed {
    fn include(&mut self, _: &WalkContext<'_>, _: &Commit) -> Result<Verdict, SieveError> {
        self.calls += 1;
        Ok(self.stop.verdict(self.matched))
    }

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(Self::new(self.matched).stopping(self.stop))
    }
}

/// Linear history of `n` commits, each touching `file{i}.txt`
pub(crate) fn linear_repo(n: usize) -> MemoryRepo {
    let mut repo = MemoryRepo::new();
    for i in 0..n {
        repo.commit(
            &format!("Commit {i}"),
            vec![DiffEntry::added(format!("file{i}.txt"), None)],
        );
    }
    repo
}

/// The newest commit of `repo`
pub(crate) fn head(repo: &MemoryRepo) -> Commit {
    repo.commits(&WalkOptions::latest(1))
        .expect("walk")
        .next()
        .expect("non-empty repository")
        .expect("readable commit")
}

/// Evaluate `filter` once against `commit`
pub(crate) fn eval(filter: &mut dyn Filter, repo: &MemoryRepo, commit: &Commit) -> Verdict {
    let ctx = WalkContext::new(repo);
    filter.include(&ctx, commit).expect("include")
}
