// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Path-level diff types

use serde::{Deserialize, Serialize};

/// Kind of change a diff entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Path created
    Add,
    /// Path content or mode changed
    Modify,
    /// Path removed
    Delete,
    /// Path moved (only reported with rename detection enabled)
    Rename,
    /// Path copied (only reported with rename detection enabled)
    Copy,
}

impl ChangeType {
    /// Lowercase name, as used in serialized output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Modify => "modify",
            Self::Delete => "delete",
            Self::Rename => "rename",
            Self::Copy => "copy",
        }
    }
}

/// A single path-level change between a commit and one of its parents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    /// What happened to the path
    pub change: ChangeType,
    /// Path before the change, [`DiffEntry::NO_PATH`] for additions
    pub old_path: String,
    /// Path after the change, [`DiffEntry::NO_PATH`] for deletions
    pub new_path: String,
    /// Parent the entry was computed against, `None` for root commits
    pub parent: Option<String>,
}

impl DiffEntry {
    /// Sentinel path standing in for "no path on this side"
    pub const NO_PATH: &'static str = "/dev/null";

    /// Entry for a path added relative to `parent`
    #[must_use]
    pub fn added(path: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            change: ChangeType::Add,
            old_path: Self::NO_PATH.to_string(),
            new_path: path.into(),
            parent,
        }
    }

    /// Entry for a path modified in place
    #[must_use]
    pub fn modified(path: impl Into<String>, parent: Option<String>) -> Self {
        let path = path.into();
        Self {
            change: ChangeType::Modify,
            old_path: path.clone(),
            new_path: path,
            parent,
        }
    }

    /// Entry for a deleted path
    #[must_use]
    pub fn deleted(path: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            change: ChangeType::Delete,
            old_path: path.into(),
            new_path: Self::NO_PATH.to_string(),
            parent,
        }
    }

    /// Entry for a path moved from `from` to `to`
    #[must_use]
    pub fn renamed(
        from: impl Into<String>,
        to: impl Into<String>,
        parent: Option<String>,
    ) -> Self {
        Self {
            change: ChangeType::Rename,
            old_path: from.into(),
            new_path: to.into(),
            parent,
        }
    }

    /// Old path, or `None` when the entry is an addition
    #[must_use]
    pub fn old_path_opt(&self) -> Option<&str> {
        (self.old_path != Self::NO_PATH).then_some(self.old_path.as_str())
    }

    /// New path, or `None` when the entry is a deletion
    #[must_use]
    pub fn new_path_opt(&self) -> Option<&str> {
        (self.new_path != Self::NO_PATH).then_some(self.new_path.as_str())
    }

    /// The path this entry is best known by (new path unless deleted)
    #[must_use]
    pub fn path(&self) -> &str {
        self.new_path_opt().unwrap_or(&self.old_path)
    }
}

/// Which parent(s) a commit is diffed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentSelection {
    /// The first (primary) parent
    #[default]
    First,
    /// A specific parent by position
    Index(usize),
    /// Every parent in turn, entries concatenated in parent order
    All,
}

/// Configuration for diff computation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Parent(s) to diff against
    pub parents: ParentSelection,
    /// Report renames and copies instead of add/delete pairs
    pub detect_renames: bool,
}

impl DiffOptions {
    /// Diff against every parent
    #[must_use]
    pub fn all_parents(mut self) -> Self {
        self.parents = ParentSelection::All;
        self
    }

    /// Diff against the parent at `index`
    #[must_use]
    pub fn parent(mut self, index: usize) -> Self {
        self.parents = ParentSelection::Index(index);
        self
    }

    /// Enable rename and copy detection
    #[must_use]
    pub fn with_renames(mut self) -> Self {
        self.detect_renames = true;
        self
    }

    /// Parent indices to diff `parent_count` parents against
    ///
    /// An empty result means the commit is a root and should be diffed
    /// against the empty tree. An index past the end is returned as-is so
    /// the caller can report it.
    #[must_use]
    pub fn parent_indices(&self, parent_count: usize) -> Vec<usize> {
        if parent_count == 0 {
            return Vec::new();
        }
        match self.parents {
            ParentSelection::First => vec![0],
            ParentSelection::Index(index) => vec![index],
            ParentSelection::All => (0..parent_count).collect(),
        }
    }
}
