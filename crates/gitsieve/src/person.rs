// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Author and committer matching

use gitsieve_git::{Commit, Identity};

use crate::error::SieveError;
use crate::filter::{Filter, StopPolicy, Verdict, WalkContext};

/// Which identity of a commit to inspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// The author
    #[default]
    Author,
    /// The committer
    Committer,
}

impl Role {
    /// The identity of `commit` in this role
    #[must_use]
    pub fn of(self, commit: &Commit) -> &Identity {
        match self {
            Self::Author => &commit.author,
            Self::Committer => &commit.committer,
        }
    }
}

/// Reject names and emails that could not appear in a `Name <email>` line
pub(crate) fn check_identity_part(value: &str) -> Result<(), SieveError> {
    let malformed = value.trim().is_empty()
        || value
            .chars()
            .any(|c| matches!(c, '<' | '>' | '\n' | '\r'));
    if malformed {
        return Err(SieveError::InvalidIdentity {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Matches commits whose author or committer has a given name and/or email
///
/// Names compare exactly; emails compare ASCII case-insensitively.
#[derive(Debug, Clone)]
pub struct PersonFilter {
    role: Role,
    name: Option<String>,
    email: Option<String>,
    stop: StopPolicy,
}

impl PersonFilter {
    /// Match both name and email of `identity`
    ///
    /// # Errors
    ///
    /// Returns `SieveError::InvalidIdentity` if either part is empty or
    /// contains `<`, `>` or a line break.
    pub fn new(role: Role, identity: &Identity) -> Result<Self, SieveError> {
        check_identity_part(&identity.name)?;
        check_identity_part(&identity.email)?;
        Ok(Self {
            role,
            name: Some(identity.name.clone()),
            email: Some(identity.email.clone()),
            stop: StopPolicy::Never,
        })
    }

    /// Match the name only
    ///
    /// # Errors
    ///
    /// Returns `SieveError::InvalidIdentity` for a malformed name.
    pub fn by_name(role: Role, name: &str) -> Result<Self, SieveError> {
        check_identity_part(name)?;
        Ok(Self {
            role,
            name: Some(name.to_string()),
            email: None,
            stop: StopPolicy::Never,
        })
    }

    /// Match the email only
    ///
    /// # Errors
    ///
    /// Returns `SieveError::InvalidIdentity` for a malformed email.
    pub fn by_email(role: Role, email: &str) -> Result<Self, SieveError> {
        check_identity_part(email)?;
        Ok(Self {
            role,
            name: None,
            email: Some(email.to_string()),
            stop: StopPolicy::Never,
        })
    }

    /// Shorthand for [`PersonFilter::new`] with [`Role::Author`]
    ///
    /// # Errors
    ///
    /// See [`PersonFilter::new`].
    pub fn author(identity: &Identity) -> Result<Self, SieveError> {
        Self::new(Role::Author, identity)
    }

    /// Shorthand for [`PersonFilter::new`] with [`Role::Committer`]
    ///
    /// # Errors
    ///
    /// See [`PersonFilter::new`].
    pub fn committer(identity: &Identity) -> Result<Self, SieveError> {
        Self::new(Role::Committer, identity)
    }

    /// Set the stop policy
    #[must_use]
    pub fn with_stop(mut self, stop: StopPolicy) -> Self {
        self.stop = stop;
        self
    }

    fn matches(&self, identity: &Identity) -> bool {
        let name_ok = self.name.as_ref().is_none_or(|name| *name == identity.name);
        let email_ok = self
            .email
            .as_ref()
            .is_none_or(|email| email.eq_ignore_ascii_case(&identity.email));
        name_ok && email_ok
    }
}

impl Filter for PersonFilter {
    fn include(&mut self, _: &WalkContext<'_>, commit: &Commit) -> Result<Verdict, SieveError> {
        Ok(self.stop.verdict(self.matches(self.role.of(commit))))
    }

    fn clone_filter(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}
