// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit time and shape filters

use chrono::{DateTime, Utc};
use gitsieve_git::Commit;

use crate::error::SieveError;
use crate::filter::{Filter, StopPolicy, Verdict, WalkContext};
use crate::person::Role;

/// Matches commits whose author or committer time falls in a range
///
/// Both bounds are inclusive and optional. Cheap to evaluate, so it belongs
/// in front of diff filters inside an [`AndFilter`](crate::AndFilter).
#[derive(Debug, Clone)]
pub struct DateFilter {
    role: Role,
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
    stop: StopPolicy,
}

impl DateFilter {
    /// Match times within `since..=until`
    ///
    /// # Errors
    ///
    /// Returns `SieveError::InvalidConfig` if `since` is after `until`.
    pub fn between(
        role: Role,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Self, SieveError> {
        if let (Some(since), Some(until)) = (since, until)
            && since > until
        {
            return Err(SieveError::InvalidConfig {
                message: format!("date range starts at {since} but ends at {until}"),
            });
        }
        Ok(Self {
            role,
            since,
            until,
            stop: StopPolicy::Never,
        })
    }

    /// Match times at or after `since`
    #[must_use]
    pub fn since(role: Role, since: DateTime<Utc>) -> Self {
        Self {
            role,
            since: Some(since),
            until: None,
            stop: StopPolicy::Never,
        }
    }

    /// Match times at or before `until`
    #[must_use]
    pub fn until(role: Role, until: DateTime<Utc>) -> Self {
        Self {
            role,
            since: None,
            until: Some(until),
            stop: StopPolicy::Never,
        }
    }

    /// Set the stop policy
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }
}

impl Filter for DateFilter {
    fn include(&mut self, _: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        let when = self.role.of(commit).when;
        let after_start = self.since.is_none_or(|since| when >= since);
        let before_end = self.until.is_none_or(|until| when <= until);
        Ok(self.stop.verdict(after_start && before_end))
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

/// Matches commits by number of parents
#[derive(Debug, Clone)]
pub struct ParentCountFilter {
    min: usize,
    max: usize,
    stop: StopPolicy,
}

impl ParentCountFilter {
    /// Match commits with `min..=max` parents
    ///
    /// # Errors
    ///
    /// Returns `SieveError::InvalidConfig` if `min > max`.
    pub fn between(min: usize, max: usize) -> Result<Self, SieveError> {
        if min > max {
            return Err(SieveError::InvalidConfig {
                message: format!("parent range {min}..={max} is empty"),
            });
        }
        Ok(Self {
            min,
            max,
            stop: StopPolicy::Never,
        })
    }

    /// Match merge commits
    #[must_use]
    pub fn merges() -> Self {
        Self {
            min: 2,
            max: usize::MAX,
            stop: StopPolicy::Never,
        }
    }

    /// Match root and single-parent commits
    #[must_use]
    pub fn non_merges() -> Self {
        Self {
            min: 0,
            max: 1,
            stop: StopPolicy::Never,
        }
    }

    /// Set the stop policy
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }
}

impl Filter for ParentCountFilter {
    fn include(&mut self, _: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        let parents = commit.parents.len();
        Ok(self.stop.verdict((self.min..=self.max).contains(&parents)))
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{eval, head, linear_repo};
    use chrono::{Duration, TimeZone};
    use gitsieve_git::{DiffEntry, MemoryRepo};

    #[test]
    fn test_date_range_inclusive() {
        let repo = linear_repo(1);
        let commit = head(&repo);
        let when = commit.author.when;

        let mut exact = DateFilter::between(Role::Author, Some(when), Some(when)).expect("valid");
        assert!(eval(&mut exact, &repo, &commit).matched);

        let mut later = DateFilter::since(Role::Committer, when + Duration::seconds(1));
        assert!(!eval(&mut later, &repo, &commit).matched);

        let mut earlier = DateFilter::until(Role::Author, when - Duration::days(1))
            .with_stop(StopPolicy::OnMiss);
        assert_eq!(
            eval(&mut earlier, &repo, &commit),
            Verdict::new(false, true)
        );
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let start = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            DateFilter::between(Role::Author, Some(start), Some(end)),
            Err(SieveError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_parent_counts() {
        let mut repo = MemoryRepo::new();
        repo.commit("base", vec![DiffEntry::added("a.txt", None)]);
        repo.branch("side");
        repo.commit("side", vec![]);
        repo.checkout("master");
        repo.commit("main", vec![]);
        repo.merge("side", "merge", [vec![], vec![]]).expect("merge");
        let merge = head(&repo);

        assert!(eval(&mut ParentCountFilter::merges(), &repo, &merge).matched);
        assert!(!eval(&mut ParentCountFilter::non_merges(), &repo, &merge).matched);

        let mut exactly_two = ParentCountFilter::between(2, 2).expect("valid");
        assert!(eval(&mut exactly_two, &repo, &merge).matched);
        assert!(ParentCountFilter::between(3, 1).is_err());
    }
}
