// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite results and the markdown report.

use crate::orchestrator::{Baseline, ScenarioOutcome};
use std::path::PathBuf;
use std::time::Duration;

/// Process exit codes for the harness
pub mod exit_codes {
    /// Every scenario passed
    pub const SUCCESS: i32 = 0;
    /// At least one scenario failed
    pub const FAILURE: i32 = 1;
    /// Configuration, input or baseline problem; no scenarios ran
    pub const SETUP_ERROR: i32 = 2;
}

/// Baseline figures shown in the report header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaselineSummary {
    pub files: usize,
    pub distinct: usize,
    pub elapsed: Duration,
}

impl From<&Baseline> for BaselineSummary {
    fn from(baseline: &Baseline) -> Self {
        Self {
            files: baseline.file_count(),
            distinct: baseline.distinct_count(),
            elapsed: baseline.elapsed(),
        }
    }
}

/// Pass/fail counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} scenarios: {} passed, {} failed",
            self.total(),
            self.passed,
            self.failed
        )
    }
}

/// Outcome of a whole suite run
pub struct SuiteReport {
    suite: String,
    executable: PathBuf,
    input: PathBuf,
    baseline: BaselineSummary,
    outcomes: Vec<ScenarioOutcome>,
    generated: Option<String>,
}

impl SuiteReport {
    pub fn new(
        suite: impl Into<String>,
        executable: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
        baseline: BaselineSummary,
        outcomes: Vec<ScenarioOutcome>,
    ) -> Self {
        Self {
            suite: suite.into(),
            executable: executable.into(),
            input: input.into(),
            baseline,
            outcomes,
            generated: None,
        }
    }

    /// Stamp the report with the current local time.
    pub fn with_timestamp(self) -> Self {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z");
        self.with_date(now.to_string())
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.generated = Some(date.into());
        self
    }

    pub fn outcomes(&self) -> &[ScenarioOutcome] {
        &self.outcomes
    }

    pub fn summary(&self) -> Summary {
        let passed = self.outcomes.iter().filter(|o| o.passed()).count();
        Summary {
            passed,
            failed: self.outcomes.len() - passed,
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.summary().failed == 0 {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        }
    }

    /// Generate markdown report
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# {} Functional Report\n\n", self.suite));

        if let Some(date) = &self.generated {
            md.push_str(&format!("Generated: {}\n", date));
        }
        md.push_str(&format!("Executable: `{}`\n", self.executable.display()));
        md.push_str(&format!("Input: `{}`\n", self.input.display()));
        md.push('\n');

        // Summary
        md.push_str("## Summary\n\n");
        let summary = self.summary();
        md.push_str(&format!("- Passed: {}\n", summary.passed));
        md.push_str(&format!("- Failed: {}\n", summary.failed));
        md.push_str(&format!(
            "- Baseline: {} files, {} distinct, {:.1}s\n",
            self.baseline.files,
            self.baseline.distinct,
            self.baseline.elapsed.as_secs_f64()
        ));
        md.push('\n');

        md.push_str("## Scenarios\n\n");
        md.push_str("| Scenario | Kind | Status | Files | Distinct | Time |\n");
        md.push_str("|----------|------|--------|-------|----------|------|\n");
        for outcome in &self.outcomes {
            let status = if outcome.passed() { "✅" } else { "❌" };
            md.push_str(&format!(
                "| `{}` | {} | {} | {} | {} | {:.1}s |\n",
                outcome.name,
                outcome.kind,
                status,
                or_dash(outcome.file_count),
                or_dash(outcome.distinct),
                outcome.elapsed.as_secs_f64()
            ));
        }
        md.push('\n');

        let failed: Vec<&ScenarioOutcome> =
            self.outcomes.iter().filter(|o| !o.passed()).collect();
        if !failed.is_empty() {
            md.push_str("## Failures\n\n");
            for outcome in failed {
                md.push_str(&format!("### {}\n\n", outcome.name));
                for failure in &outcome.failures {
                    md.push_str(&format!("- **{}**: {}\n", failure.category(), failure));
                    if let Some((stdout, stderr)) = failure.captured_output() {
                        push_block(&mut md, "stdout", stdout);
                        push_block(&mut md, "stderr", stderr);
                    }
                }
                md.push('\n');
            }
        }

        md
    }
}

fn or_dash(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn push_block(md: &mut String, label: &str, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    md.push_str(&format!("\n  {}:\n\n  ```\n", label));
    for line in text.lines() {
        md.push_str(&format!("  {}\n", line));
    }
    md.push_str("  ```\n");
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
