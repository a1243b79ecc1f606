// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit message matching

use gitsieve_git::{Commit, Identity};
use regex::Regex;

use crate::error::SieveError;
use crate::filter::{Filter, StopPolicy, Verdict, WalkContext};
use crate::person::check_identity_part;

/// Trailer tag introducing a sign-off line
pub const SIGNED_OFF_BY: &str = "Signed-off-by: ";

/// Matches commits whose message contains a regex match
#[derive(Debug, Clone)]
pub struct MessageFilter {
    pattern: Regex,
    stop: StopPolicy,
}

impl MessageFilter {
    /// Compile `pattern`
    ///
    /// # Errors
    ///
    /// Returns `SieveError::Pattern` if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, SieveError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            stop: StopPolicy::Never,
        })
    }

    /// Set the stop policy
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    /// The compiled pattern
    #[must_use]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl Filter for MessageFilter {
    fn include(&mut self, _: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        Ok(self.stop.verdict(self.pattern.is_match(&commit.message)))
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

/// Matches commits carrying a trailer such as `Signed-off-by: Name <email>`
///
/// A line matches when it contains the tag immediately followed by the
/// target's `Name <email>`.
#[derive(Debug, Clone)]
pub struct TrailerFilter {
    identity: Identity,
    needle: String,
    stop: StopPolicy,
}

impl TrailerFilter {
    /// Match `tag` followed by `identity`
    ///
    /// # Errors
    ///
    /// Returns `SieveError::InvalidIdentity` if the name or email is empty
    /// or contains `<`, `>` or a line break, and `SieveError::InvalidConfig`
    /// if the tag is empty or spans lines.
    pub fn new(tag: &str, identity: &Identity) -> Result<Self, SieveError> {
        if tag.is_empty() || tag.contains(['\n', '\r']) {
            return Err(SieveError::InvalidConfig {
                message: format!("trailer tag must be a single non-empty line, got {tag:?}"),
            });
        }
        check_identity_part(&identity.name)?;
        check_identity_part(&identity.email)?;
        Ok(Self {
            needle: format!("{tag}{identity}"),
            identity: identity.clone(),
            stop: StopPolicy::Never,
        })
    }

    /// Match a `Signed-off-by:` trailer for `identity`
    ///
    /// # Errors
    ///
    /// See [`TrailerFilter::new`].
    pub fn signed_off_by(identity: &Identity) -> Result<Self, SieveError> {
        Self::new(SIGNED_OFF_BY, identity)
    }

    /// Set the stop policy
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    /// The identity being looked for
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Whether any line of `message` carries the trailer
    #[must_use]
    pub fn matches(&self, message: &str) -> bool {
        message.lines().any(|line| line.contains(&self.needle))
    }
}

impl Filter for TrailerFilter {
    fn include(&mut self, _: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        Ok(self.stop.verdict(self.matches(&commit.message)))
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}
