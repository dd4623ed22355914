// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario assertions.

use crate::config::ScenarioKind;
use crate::runner::{RunResult, RunStatus};
use crate::workdir::WorkdirError;
use astrocheck_fingerprint::{
    digest_file, ArtifactCategory, FileDigest, Fingerprint, SnapshotError,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Required relation between a scenario's content and the baseline's
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Digest sets must be equal
    Equal,
    /// Digest sets must differ
    Differ,
}

impl ScenarioKind {
    pub fn relation(&self) -> Relation {
        match self {
            ScenarioKind::BaseConfiguration
            | ScenarioKind::AdditiveStage
            | ScenarioKind::NoOpTransform => Relation::Equal,
            ScenarioKind::EffectiveTransform => Relation::Differ,
        }
    }
}

/// Count summary of two digest sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DigestSetDiff {
    pub baseline_distinct: usize,
    pub scenario_distinct: usize,
    pub only_in_baseline: usize,
    pub only_in_scenario: usize,
}

impl DigestSetDiff {
    pub fn between(baseline: &BTreeSet<FileDigest>, scenario: &BTreeSet<FileDigest>) -> Self {
        Self {
            baseline_distinct: baseline.len(),
            scenario_distinct: scenario.len(),
            only_in_baseline: baseline.difference(scenario).count(),
            only_in_scenario: scenario.difference(baseline).count(),
        }
    }

    pub fn is_equal(&self) -> bool {
        self.only_in_baseline == 0 && self.only_in_scenario == 0
    }
}

impl std::fmt::Display for DigestSetDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "baseline {} distinct, scenario {} distinct, {} only in baseline, {} only in scenario",
            self.baseline_distinct,
            self.scenario_distinct,
            self.only_in_baseline,
            self.only_in_scenario
        )
    }
}

fn excluded_note(excluded: &BTreeSet<ArtifactCategory>) -> String {
    if excluded.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = excluded.iter().map(|c| c.name()).collect();
        format!(" (excluding {})", names.join(", "))
    }
}

/// Why a scenario failed
#[derive(Debug, Error)]
pub enum AssertionFailure {
    #[error("Failed to launch pipeline: {message}")]
    Launch { message: String },

    #[error("Pipeline timed out after {:.1}s", after.as_secs_f64())]
    TimedOut { after: Duration },

    #[error("Pipeline terminated by signal {signal}")]
    Signaled {
        signal: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Expected exit code {expected}, got {actual}")]
    ExitCode {
        expected: i32,
        actual: i32,
        stdout: String,
        stderr: String,
    },

    #[error(transparent)]
    Workdir(#[from] WorkdirError),

    #[error("Snapshot failed: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Scenario task aborted: {message}")]
    Aborted { message: String },

    #[error("Input file '{}' could not be read: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file '{}' is missing after the run", path.display())]
    InputMissing { path: PathBuf },

    #[error(
        "Input file '{}' was modified ({} -> {})",
        path.display(),
        before.short(),
        after.short()
    )]
    InputModified {
        path: PathBuf,
        before: FileDigest,
        after: FileDigest,
    },

    #[error("Expected {expected} files, found {actual}")]
    FileCount { expected: usize, actual: usize },

    #[error("Content differs from baseline{}: {diff}", excluded_note(excluded))]
    ContentMismatch {
        excluded: BTreeSet<ArtifactCategory>,
        diff: DigestSetDiff,
    },

    #[error(
        "Content identical to baseline{} ({distinct} distinct files); transform had no effect",
        excluded_note(excluded)
    )]
    ContentUnchanged {
        excluded: BTreeSet<ArtifactCategory>,
        distinct: usize,
    },
}

impl AssertionFailure {
    /// Short label for grouping in reports.
    pub fn category(&self) -> &'static str {
        match self {
            AssertionFailure::Launch { .. } => "launch",
            AssertionFailure::TimedOut { .. } => "timeout",
            AssertionFailure::Signaled { .. } | AssertionFailure::ExitCode { .. } => "exit code",
            AssertionFailure::Workdir(_) => "working directory",
            AssertionFailure::Snapshot(_) => "snapshot",
            AssertionFailure::Aborted { .. } => "aborted",
            AssertionFailure::InputUnreadable { .. }
            | AssertionFailure::InputMissing { .. }
            | AssertionFailure::InputModified { .. } => "input",
            AssertionFailure::FileCount { .. } => "file count",
            AssertionFailure::ContentMismatch { .. }
            | AssertionFailure::ContentUnchanged { .. } => "content",
        }
    }

    /// Captured pipeline output attached to the failure, if any.
    pub fn captured_output(&self) -> Option<(&str, &str)> {
        match self {
            AssertionFailure::Signaled { stdout, stderr, .. }
            | AssertionFailure::ExitCode { stdout, stderr, .. } => Some((stdout, stderr)),
            _ => None,
        }
    }
}

/// The run ended the way the scenario expects.
pub fn check_exit(run: &RunResult, expected: i32) -> Result<(), AssertionFailure> {
    match run.status {
        RunStatus::LaunchFailed => Err(AssertionFailure::Launch {
            message: run.stderr.clone(),
        }),
        RunStatus::TimedOut => Err(AssertionFailure::TimedOut { after: run.elapsed }),
        RunStatus::Signaled(signal) => Err(AssertionFailure::Signaled {
            signal,
            stdout: run.stdout.clone(),
            stderr: run.stderr.clone(),
        }),
        RunStatus::Exited if run.code != expected => Err(AssertionFailure::ExitCode {
            expected,
            actual: run.code,
            stdout: run.stdout.clone(),
            stderr: run.stderr.clone(),
        }),
        RunStatus::Exited => Ok(()),
    }
}

/// The input still exists and has the digest it had before the run.
pub fn check_input(path: &Path, before: &FileDigest) -> Result<(), AssertionFailure> {
    if !path.is_file() {
        return Err(AssertionFailure::InputMissing {
            path: path.to_path_buf(),
        });
    }
    let after = digest_file(path).map_err(|source| AssertionFailure::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if &after != before {
        return Err(AssertionFailure::InputModified {
            path: path.to_path_buf(),
            before: before.clone(),
            after,
        });
    }
    Ok(())
}

pub fn check_file_count(
    fingerprint: &Fingerprint,
    expected: Option<usize>,
) -> Result<(), AssertionFailure> {
    match expected {
        Some(expected) if fingerprint.len() != expected => Err(AssertionFailure::FileCount {
            expected,
            actual: fingerprint.len(),
        }),
        _ => Ok(()),
    }
}

/// Compare digest sets after removing `exclude` from both sides.
///
/// Paths are ignored: only which content exists matters, so renumbered or
/// duplicated artifacts compare equal.
pub fn check_relation(
    relation: Relation,
    baseline: &Fingerprint,
    scenario: &Fingerprint,
    exclude: &BTreeSet<ArtifactCategory>,
) -> Result<(), AssertionFailure> {
    let baseline_set = baseline.exclude_categories(exclude).digest_set();
    let scenario_set = scenario.exclude_categories(exclude).digest_set();
    let diff = DigestSetDiff::between(&baseline_set, &scenario_set);

    match relation {
        Relation::Equal if !diff.is_equal() => Err(AssertionFailure::ContentMismatch {
            excluded: exclude.clone(),
            diff,
        }),
        Relation::Differ if diff.is_equal() => Err(AssertionFailure::ContentUnchanged {
            excluded: exclude.clone(),
            distinct: diff.scenario_distinct,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "assertion_tests.rs"]
mod tests;
