// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite configuration types for TOML suite files.

use astrocheck_fingerprint::{ArtifactCategory, CategoryRule, SymlinkPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input used when neither the suite nor the command line names one
pub const DEFAULT_INPUT: &str = "video-files/moon.mp4";
/// Per-invocation wall-clock limit
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

fn default_suite_name() -> String {
    "astrostacker".to_string()
}

/// Top-level suite configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Name for logging and the report header
    #[serde(default = "default_suite_name")]
    pub name: String,

    /// Input file handed to every invocation (default: "video-files/moon.mp4")
    /// Relative paths resolve against the suite file's directory
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Per-invocation timeout in seconds (default: 600, 0 disables)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Symlink handling during snapshots (default: skip)
    #[serde(default)]
    pub symlinks: SymlinkPolicy,

    /// Artifact categories; when present these replace the built-in set
    #[serde(default)]
    pub categories: Vec<CategoryRule>,

    /// Scenarios, run in order
    #[serde(default)]
    pub scenarios: Vec<ScenarioSpec>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            name: default_suite_name(),
            input: None,
            timeout_secs: None,
            symlinks: SymlinkPolicy::default(),
            categories: Vec::new(),
            scenarios: Vec::new(),
        }
    }
}

/// How a scenario's output is expected to relate to the baseline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Same configuration as the baseline; content must match exactly
    BaseConfiguration,
    /// A stage that adds artifacts; content matches once its categories are excluded
    AdditiveStage,
    /// A transform that should have no effect; content matches, counts may not
    NoOpTransform,
    /// A transform that must change the output
    EffectiveTransform,
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioKind::BaseConfiguration => write!(f, "base configuration"),
            ScenarioKind::AdditiveStage => write!(f, "additive stage"),
            ScenarioKind::NoOpTransform => write!(f, "no-op transform"),
            ScenarioKind::EffectiveTransform => write!(f, "effective transform"),
        }
    }
}

/// One configuration variant of the pipeline
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSpec {
    pub name: String,

    pub kind: ScenarioKind,

    /// Extra flags placed between `--working-dir <dir>` and the input file
    #[serde(default)]
    pub args: Vec<String>,

    /// Input override for this scenario
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Exit code the pipeline must return (default: 0)
    #[serde(default)]
    pub expected_exit_code: i32,

    /// Exact number of files the run must leave behind
    #[serde(default)]
    pub expected_file_count: Option<usize>,

    /// Categories removed from both sides before comparing content
    #[serde(default)]
    pub exclude: Vec<ArtifactCategory>,
}

impl ScenarioSpec {
    pub fn new(name: impl Into<String>, kind: ScenarioKind) -> Self {
        Self {
            name: name.into(),
            kind,
            args: Vec::new(),
            input: None,
            expected_exit_code: 0,
            expected_file_count: None,
            exclude: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_file_count(mut self, count: usize) -> Self {
        self.expected_file_count = Some(count);
        self
    }

    pub fn excluding(mut self, categories: impl IntoIterator<Item = ArtifactCategory>) -> Self {
        self.exclude = categories.into_iter().collect();
        self
    }
}

/// Suite run when no suite file is given.
///
/// File counts are those the reference pipeline produces for `moon.mp4`.
pub fn builtin_suite() -> SuiteConfig {
    SuiteConfig {
        name: "astrostacker-functional".to_string(),
        scenarios: vec![
            ScenarioSpec::new("base_options", ScenarioKind::BaseConfiguration)
                .with_file_count(244),
            ScenarioSpec::new("split_option", ScenarioKind::AdditiveStage)
                .with_args(["--split", "15,0"])
                .with_file_count(260)
                .excluding([
                    ArtifactCategory::Aligned,
                    ArtifactCategory::Enhanced,
                    ArtifactCategory::Stacked,
                ]),
            // Bounds larger than the frame: crop output duplicates existing frames
            ScenarioSpec::new("noop_crop_option", ScenarioKind::NoOpTransform)
                .with_args(["--crop", "10000x10000,0,0"])
                .with_file_count(304),
            ScenarioSpec::new("crop_option", ScenarioKind::EffectiveTransform)
                .with_args(["--crop", "100x200,-50,70"])
                .with_file_count(304),
        ],
        ..SuiteConfig::default()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
