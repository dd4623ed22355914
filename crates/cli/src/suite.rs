// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite loading and validation.

use crate::config::{
    builtin_suite, ScenarioKind, SuiteConfig, DEFAULT_INPUT, DEFAULT_TIMEOUT_SECS,
};
use astrocheck_fingerprint::{ArtifactCategory, CategoryRules, SymlinkPolicy};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading a suite
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Failed to read suite file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// A validated scenario
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub kind: ScenarioKind,
    pub args: Vec<String>,
    pub input: PathBuf,
    pub expected_exit_code: i32,
    pub expected_file_count: Option<usize>,
    pub exclude: BTreeSet<ArtifactCategory>,
}

/// A validated suite, ready to run
#[derive(Clone, Debug)]
pub struct Suite {
    pub name: String,
    pub input: PathBuf,
    pub timeout: Option<Duration>,
    pub symlinks: SymlinkPolicy,
    pub rules: CategoryRules,
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    /// Load a suite from a TOML file.
    ///
    /// Relative input paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path).map_err(|source| SuiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SuiteConfig = toml::from_str(&content)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_config(config, Some(base_dir))
    }

    /// The built-in functional suite.
    pub fn builtin() -> Result<Self, SuiteError> {
        Self::from_config(builtin_suite(), None)
    }

    /// Validate a config; relative inputs are joined onto `base_dir` when given.
    pub fn from_config(
        config: SuiteConfig,
        base_dir: Option<&Path>,
    ) -> Result<Self, SuiteError> {
        let resolve = |p: &Path| match base_dir {
            Some(dir) if p.is_relative() => dir.join(p),
            _ => p.to_path_buf(),
        };

        let rules = if config.categories.is_empty() {
            CategoryRules::default()
        } else {
            let mut rules = CategoryRules::empty();
            for rule in config.categories {
                if rule.markers.is_empty() || rule.markers.iter().any(String::is_empty) {
                    return Err(SuiteError::Validation(format!(
                        "Category '{}' needs at least one non-empty marker",
                        rule.category
                    )));
                }
                rules.push(rule);
            }
            rules
        };

        let input = config
            .input
            .as_deref()
            .map(resolve)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

        let timeout = match config.timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };

        let mut seen = HashSet::new();
        let mut scenarios = Vec::with_capacity(config.scenarios.len());
        for spec in config.scenarios {
            if spec.name.trim().is_empty() {
                return Err(SuiteError::Validation(
                    "Scenario name must not be empty".to_string(),
                ));
            }
            if !seen.insert(spec.name.clone()) {
                return Err(SuiteError::Validation(format!(
                    "Duplicate scenario name '{}'",
                    spec.name
                )));
            }
            if let Some(unknown) = spec.exclude.iter().find(|c| !rules.contains(c)) {
                return Err(SuiteError::Validation(format!(
                    "Scenario '{}' excludes unknown category '{}'",
                    spec.name, unknown
                )));
            }
            if spec.kind == ScenarioKind::AdditiveStage && spec.exclude.is_empty() {
                return Err(SuiteError::Validation(format!(
                    "Scenario '{}' is an additive stage and must exclude at least one category",
                    spec.name
                )));
            }

            let scenario_input = spec
                .input
                .as_deref()
                .map(resolve)
                .unwrap_or_else(|| input.clone());
            // Equal relations compare against a baseline taken on the suite input.
            if scenario_input != input && spec.kind != ScenarioKind::EffectiveTransform {
                return Err(SuiteError::Validation(format!(
                    "Scenario '{}' is a {} and cannot override the suite input",
                    spec.name, spec.kind
                )));
            }

            scenarios.push(Scenario {
                input: scenario_input,
                name: spec.name,
                kind: spec.kind,
                args: spec.args,
                expected_exit_code: spec.expected_exit_code,
                expected_file_count: spec.expected_file_count,
                exclude: spec.exclude.into_iter().collect(),
            });
        }

        Ok(Self {
            name: config.name,
            input,
            timeout,
            symlinks: config.symlinks,
            rules,
            scenarios,
        })
    }

    /// Override the input for the baseline and every scenario.
    pub fn with_input(mut self, input: PathBuf) -> Self {
        for scenario in &mut self.scenarios {
            scenario.input = input.clone();
        }
        self.input = input;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keep only the named scenarios, in suite order.
    pub fn select(mut self, names: &[String]) -> Result<Self, SuiteError> {
        if names.is_empty() {
            return Ok(self);
        }
        if let Some(unknown) = names
            .iter()
            .find(|n| !self.scenarios.iter().any(|s| &s.name == *n))
        {
            return Err(SuiteError::Validation(format!(
                "Unknown scenario '{}'",
                unknown
            )));
        }
        self.scenarios.retain(|s| names.contains(&s.name));
        Ok(self)
    }
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
