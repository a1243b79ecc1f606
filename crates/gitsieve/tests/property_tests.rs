// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for gitsieve
//!
//! Random linear histories are built in memory and walked with composed
//! filter trees; the combinators must agree with plain boolean logic over
//! the same commits.

use proptest::prelude::*;

use gitsieve::{
    AndFilter, CommitListFilter, CommitWalker, CountFilter, DiffEntry, Filter, LimitFilter,
    MemoryRepo, MessageFilter, NotFilter, OrFilter, StopPolicy,
};

// ============================================================================
// Strategies
// ============================================================================

/// Commit messages drawn from a tiny alphabet so patterns hit and miss often
fn messages() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc]{0,4}", 1..20)
}

fn repo_with(messages: &[String]) -> MemoryRepo {
    let mut repo = MemoryRepo::new();
    for (i, message) in messages.iter().enumerate() {
        repo.commit(message, vec![DiffEntry::added(format!("f{i}"), None)]);
    }
    repo
}

fn contains(pattern: &str) -> MessageFilter {
    MessageFilter::new(pattern).expect("valid pattern")
}

// ============================================================================
// Combinator laws
// ============================================================================

proptest! {
    #[test]
    fn not_partitions_history(messages in messages()) {
        let repo = repo_with(&messages);
        let walker = CommitWalker::new(&repo);

        let mut hits = CommitListFilter::new();
        let mut misses = CommitListFilter::new();
        {
            let mut tree = AndFilter::of(contains("a")).and(&mut hits);
            walker.walk(&mut tree).expect("walk");
            let mut inverted = AndFilter::of(NotFilter::new(contains("a"))).and(&mut misses);
            walker.walk(&mut inverted).expect("walk");
        }

        let expected = messages.iter().filter(|m| m.contains('a')).count();
        prop_assert_eq!(hits.commits().len(), expected);
        prop_assert_eq!(misses.commits().len(), messages.len() - expected);
        prop_assert!(hits.commits().iter().all(|sha| !misses.commits().contains(sha)));
    }

    #[test]
    fn and_or_agree_with_boolean_logic(messages in messages()) {
        let repo = repo_with(&messages);
        let walker = CommitWalker::new(&repo);

        let mut both = AndFilter::of(contains("a")).and(contains("b"));
        let mut either = OrFilter::of(contains("a")).or(contains("b"));
        let both_matched = walker.walk(&mut both).expect("walk").matched;
        let either_matched = walker.walk(&mut either).expect("walk").matched;

        let expected_both = messages
            .iter()
            .filter(|m| m.contains('a') && m.contains('b'))
            .count();
        let expected_either = messages
            .iter()
            .filter(|m| m.contains('a') || m.contains('b'))
            .count();
        prop_assert_eq!(both_matched, expected_both);
        prop_assert_eq!(either_matched, expected_either);
    }

    #[test]
    fn and_short_circuit_hides_commits(messages in messages()) {
        let repo = repo_with(&messages);
        let mut seen = CountFilter::new();
        {
            let mut tree = AndFilter::of(contains("c")).and(&mut seen);
            CommitWalker::new(&repo).walk(&mut tree).expect("walk");
        }
        let expected = messages.iter().filter(|m| m.contains('c')).count();
        prop_assert_eq!(seen.count(), expected as u64);
    }

    #[test]
    fn or_short_circuit_hides_commits(messages in messages()) {
        let repo = repo_with(&messages);
        let mut seen = CountFilter::new();
        {
            let mut tree = OrFilter::of(contains("c")).or(NotFilter::new(&mut seen));
            CommitWalker::new(&repo).walk(&mut tree).expect("walk");
        }
        let expected = messages.iter().filter(|m| !m.contains('c')).count();
        prop_assert_eq!(seen.count(), expected as u64);
    }

    #[test]
    fn clones_share_no_state(messages in messages(), walks in 1usize..4) {
        let repo = repo_with(&messages);
        let walker = CommitWalker::new(&repo);
        let mut original = AndFilter::of(contains("a")).and(CountFilter::new());
        walker.walk(&mut original).expect("walk");

        let mut clone = original.clone_filter();
        for _ in 0..walks {
            walker.walk(&mut clone).expect("walk");
        }
        let again = walker.walk(&mut original).expect("walk");
        let expected = messages.iter().filter(|m| m.contains('a')).count();
        prop_assert_eq!(again.matched, expected);
    }

    #[test]
    fn per_walk_count_is_idempotent(messages in messages(), walks in 1usize..5) {
        let repo = repo_with(&messages);
        let walker = CommitWalker::new(&repo);
        let mut per_walk = CountFilter::per_walk();
        let mut persistent = CountFilter::new();
        for _ in 0..walks {
            walker.walk(&mut per_walk).expect("walk");
            walker.walk(&mut persistent).expect("walk");
        }
        prop_assert_eq!(per_walk.count(), messages.len() as u64);
        prop_assert_eq!(persistent.count(), (messages.len() * walks) as u64);
    }

    #[test]
    fn limit_bounds_matches(messages in messages(), limit in 0usize..25) {
        let repo = repo_with(&messages);
        let outcome = CommitWalker::new(&repo)
            .walk(&mut LimitFilter::new(limit))
            .expect("walk");

        prop_assert_eq!(outcome.matched, limit.min(messages.len()));
        prop_assert_eq!(outcome.visited, (limit + 1).min(messages.len()));
        prop_assert_eq!(outcome.stopped(), limit < messages.len());
    }

    #[test]
    fn always_stop_visits_one(messages in messages()) {
        let repo = repo_with(&messages);
        let mut tree = NotFilter::new(contains("a")).with_stop(StopPolicy::Always);
        let outcome = CommitWalker::new(&repo).walk(&mut tree).expect("walk");
        prop_assert_eq!(outcome.visited, 1);
        prop_assert!(outcome.stopped());
    }
}
