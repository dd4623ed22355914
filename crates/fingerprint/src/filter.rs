// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Removing categories of artifacts from a fingerprint.

use crate::category::ArtifactCategory;
use crate::snapshot::Fingerprint;
use std::collections::BTreeSet;

/// Raw path-substring exclusions.
///
/// Prefer [`Fingerprint::exclude_categories`]; this form matches paths
/// directly and is kept for ad-hoc filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionRules {
    substrings: BTreeSet<String>,
}

impl ExclusionRules {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            substrings: substrings.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.substrings.is_empty()
    }

    /// Whether any rule occurs in `path`.
    pub fn excludes(&self, path: &str) -> bool {
        self.substrings.iter().any(|s| path.contains(s.as_str()))
    }
}

impl Fingerprint {
    /// Copy without entries whose relative path contains any rule substring.
    pub fn exclude_substrings(&self, rules: &ExclusionRules) -> Fingerprint {
        self.retain_cloned(|path, _| !rules.excludes(path))
    }

    /// Copy without entries tagged with any of `categories`.
    pub fn exclude_categories(&self, categories: &BTreeSet<ArtifactCategory>) -> Fingerprint {
        if categories.is_empty() {
            return self.clone();
        }
        self.retain_cloned(|_, entry| !entry.is_in_any(categories))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
