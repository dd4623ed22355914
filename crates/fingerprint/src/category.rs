// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact categories derived from pipeline output paths.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::str::FromStr;

/// Pipeline stage an output file belongs to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArtifactCategory {
    /// Frames extracted from the input video
    Frames,
    /// Main-object extraction output
    Object,
    Crop,
    /// Frames picked as best for stacking
    Best,
    Aligned,
    Stacked,
    Enhanced,
    /// Per-segment output of the split stage
    Segments,
    /// Category introduced by configuration
    Custom(String),
}

impl ArtifactCategory {
    /// Categories the pipeline is known to produce.
    pub const KNOWN: [ArtifactCategory; 8] = [
        ArtifactCategory::Frames,
        ArtifactCategory::Object,
        ArtifactCategory::Crop,
        ArtifactCategory::Best,
        ArtifactCategory::Aligned,
        ArtifactCategory::Stacked,
        ArtifactCategory::Enhanced,
        ArtifactCategory::Segments,
    ];

    pub fn name(&self) -> &str {
        match self {
            ArtifactCategory::Frames => "frames",
            ArtifactCategory::Object => "object",
            ArtifactCategory::Crop => "crop",
            ArtifactCategory::Best => "best",
            ArtifactCategory::Aligned => "aligned",
            ArtifactCategory::Stacked => "stacked",
            ArtifactCategory::Enhanced => "enhanced",
            ArtifactCategory::Segments => "segments",
            ArtifactCategory::Custom(name) => name,
        }
    }

    /// Directory name the pipeline writes this category into.
    fn default_marker(&self) -> &str {
        match self {
            ArtifactCategory::Frames => "images",
            other => other.name(),
        }
    }
}

impl std::fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArtifactCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "frames" => ArtifactCategory::Frames,
            "object" => ArtifactCategory::Object,
            "crop" => ArtifactCategory::Crop,
            "best" => ArtifactCategory::Best,
            "aligned" => ArtifactCategory::Aligned,
            "stacked" => ArtifactCategory::Stacked,
            "enhanced" => ArtifactCategory::Enhanced,
            "segments" => ArtifactCategory::Segments,
            other => ArtifactCategory::Custom(other.to_string()),
        })
    }
}

impl From<String> for ArtifactCategory {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<ArtifactCategory> for String {
    fn from(category: ArtifactCategory) -> Self {
        category.name().to_string()
    }
}

/// Maps a category to the path substrings that identify it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRule {
    #[serde(rename = "name")]
    pub category: ArtifactCategory,
    pub markers: Vec<String>,
}

impl CategoryRule {
    pub fn new(
        category: ArtifactCategory,
        markers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            category,
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    fn matches(&self, path: &str) -> bool {
        self.markers
            .iter()
            .any(|m| !m.is_empty() && path.contains(m.as_str()))
    }
}

/// Ordered set of rules used to tag snapshot entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    /// Rules with no categories; every path is left untagged.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Add a rule, merging markers if the category is already present.
    pub fn push(&mut self, rule: CategoryRule) {
        match self.rules.iter_mut().find(|r| r.category == rule.category) {
            Some(existing) => {
                for marker in rule.markers {
                    if !existing.markers.contains(&marker) {
                        existing.markers.push(marker);
                    }
                }
            }
            None => self.rules.push(rule),
        }
    }

    /// Every category whose marker occurs in `relative_path`.
    pub fn classify(&self, relative_path: &str) -> BTreeSet<ArtifactCategory> {
        self.rules
            .iter()
            .filter(|r| r.matches(relative_path))
            .map(|r| r.category.clone())
            .collect()
    }

    pub fn contains(&self, category: &ArtifactCategory) -> bool {
        self.rules.iter().any(|r| &r.category == category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &ArtifactCategory> {
        self.rules.iter().map(|r| &r.category)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CategoryRules {
    /// One rule per known category, keyed on the stage's directory name.
    fn default() -> Self {
        Self {
            rules: ArtifactCategory::KNOWN
                .iter()
                .map(|c| CategoryRule::new(c.clone(), [c.default_marker()]))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "category_tests.rs"]
mod tests;
