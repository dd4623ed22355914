// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario orchestration.
//!
//! Each scenario gets a fresh working directory, one pipeline invocation, a
//! snapshot of what the pipeline wrote, and a set of checks against the
//! baseline. The baseline is computed once and only read afterwards.

use crate::assertion::{
    check_exit, check_file_count, check_input, check_relation, AssertionFailure,
};
use crate::config::ScenarioKind;
use crate::output_diagnostic::{print_status, print_verdict, print_warning};
use crate::runner::{ProcessRunner, RunResult};
use crate::suite::{Scenario, Suite};
use crate::workdir::{ScopedWorkdir, WorkdirError};
use astrocheck_capture::{CaptureLog, CapturedArgs};
use astrocheck_fingerprint::{digest_file, FileDigest, Fingerprint, Snapshotter};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Semaphore;

/// Name recorded in the invocation log for the setup run.
pub const BASELINE_LABEL: &str = "baseline";

/// Errors that prevent the suite from starting
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Input file '{}' could not be read: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Workdir(#[from] WorkdirError),

    #[error("Baseline run failed: {0}")]
    Baseline(#[source] AssertionFailure),
}

/// Fingerprint of the default invocation, shared read-only by every scenario.
#[derive(Clone, Debug)]
pub struct Baseline {
    fingerprint: Fingerprint,
    digests: BTreeSet<FileDigest>,
    elapsed: Duration,
}

impl Baseline {
    pub fn new(fingerprint: Fingerprint, elapsed: Duration) -> Self {
        let digests = fingerprint.digest_set();
        Self {
            fingerprint,
            digests,
            elapsed,
        }
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn digests(&self) -> &BTreeSet<FileDigest> {
        &self.digests
    }

    pub fn file_count(&self) -> usize {
        self.fingerprint.len()
    }

    pub fn distinct_count(&self) -> usize {
        self.digests.len()
    }

    /// Wall-clock time of the baseline invocation.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Result of one scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub kind: ScenarioKind,
    pub failures: Vec<AssertionFailure>,
    /// Files in the snapshot, when one was taken
    pub file_count: Option<usize>,
    /// Distinct digests in the snapshot, when one was taken
    pub distinct: Option<usize>,
    pub elapsed: Duration,
}

impl ScenarioOutcome {
    fn new(scenario: &Scenario) -> Self {
        Self {
            name: scenario.name.clone(),
            kind: scenario.kind,
            failures: Vec::new(),
            file_count: None,
            distinct: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(mut self, failure: impl Into<AssertionFailure>, start: Instant) -> Self {
        self.failures.push(failure.into());
        self.elapsed = start.elapsed();
        self
    }
}

/// Argument vector for one invocation.
pub fn build_argv(workdir: &Path, args: &[String], input: &Path) -> Vec<String> {
    let mut argv = Vec::with_capacity(args.len() + 3);
    argv.push("--working-dir".to_string());
    argv.push(workdir.display().to_string());
    argv.extend(args.iter().cloned());
    argv.push(input.display().to_string());
    argv
}

/// Drives the baseline and every scenario of a suite.
#[derive(Clone)]
pub struct Orchestrator {
    runner: ProcessRunner,
    suite: Arc<Suite>,
    snapshotter: Snapshotter,
    log: CaptureLog,
    work_root: Option<PathBuf>,
    verbose: bool,
    jobs: usize,
}

impl Orchestrator {
    pub fn new(runner: ProcessRunner, suite: Suite) -> Self {
        let snapshotter = Snapshotter::new(suite.rules.clone()).symlinks(suite.symlinks);
        Self {
            runner,
            suite: Arc::new(suite),
            snapshotter,
            log: CaptureLog::new(),
            work_root: None,
            verbose: false,
            jobs: 1,
        }
    }

    /// Record invocations into `log` instead of a private in-memory log.
    pub fn with_log(mut self, log: CaptureLog) -> Self {
        self.log = log;
        self
    }

    /// Parent directory for scenario working directories.
    pub fn with_work_root(mut self, work_root: Option<PathBuf>) -> Self {
        self.work_root = work_root;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Maximum scenarios in flight; values below 1 mean 1.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn suite(&self) -> &Suite {
        &self.suite
    }

    pub fn log(&self) -> &CaptureLog {
        &self.log
    }

    /// Run the default invocation once and fingerprint its output.
    pub async fn prepare_baseline(&self) -> Result<Baseline, SetupError> {
        let input = self.suite.input.clone();
        let before = digest_file(&input).map_err(|source| SetupError::Input {
            path: input.clone(),
            source,
        })?;

        let workdir = ScopedWorkdir::create(self.work_root.as_deref(), BASELINE_LABEL)?;
        let argv = build_argv(workdir.path(), &[], &input);
        let run = self.invoke(BASELINE_LABEL, &argv, workdir.path()).await;
        check_exit(&run, 0).map_err(SetupError::Baseline)?;

        let snapshot = self.snapshot(workdir.path()).await;
        self.release(workdir);
        let fingerprint = snapshot.map_err(SetupError::Baseline)?;
        check_input(&input, &before).map_err(SetupError::Baseline)?;

        if fingerprint.is_empty() {
            print_warning("Baseline run produced no files");
        }
        if self.verbose {
            print_status(format!(
                "Baseline: {} files, {} distinct in {:.1}s",
                fingerprint.len(),
                fingerprint.distinct_count(),
                run.elapsed.as_secs_f64()
            ));
        }
        Ok(Baseline::new(fingerprint, run.elapsed))
    }

    /// Run one scenario against `baseline`, collecting every failed check.
    pub async fn run_scenario(&self, scenario: &Scenario, baseline: &Baseline) -> ScenarioOutcome {
        let start = Instant::now();
        let outcome = ScenarioOutcome::new(scenario);

        let before = match digest_file(&scenario.input) {
            Ok(digest) => digest,
            Err(source) => {
                let failure = AssertionFailure::InputUnreadable {
                    path: scenario.input.clone(),
                    source,
                };
                return outcome.fail(failure, start);
            }
        };

        let workdir = match ScopedWorkdir::create(self.work_root.as_deref(), &scenario.name) {
            Ok(workdir) => workdir,
            Err(e) => return outcome.fail(e, start),
        };

        let argv = build_argv(workdir.path(), &scenario.args, &scenario.input);
        let run = self.invoke(&scenario.name, &argv, workdir.path()).await;
        if let Err(failure) = check_exit(&run, scenario.expected_exit_code) {
            self.release(workdir);
            return outcome.fail(failure, start);
        }

        let fingerprint = match self.snapshot(workdir.path()).await {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                self.release(workdir);
                return outcome.fail(e, start);
            }
        };
        self.release(workdir);

        let mut outcome = outcome;
        outcome.file_count = Some(fingerprint.len());
        outcome.distinct = Some(fingerprint.distinct_count());

        let checks = [
            check_input(&scenario.input, &before),
            check_file_count(&fingerprint, scenario.expected_file_count),
            check_relation(
                scenario.kind.relation(),
                baseline.fingerprint(),
                &fingerprint,
                &scenario.exclude,
            ),
        ];
        outcome
            .failures
            .extend(checks.into_iter().filter_map(Result::err));
        outcome.elapsed = start.elapsed();
        outcome
    }

    /// Run every scenario in suite order.
    ///
    /// With more than one job, scenarios run concurrently but outcomes are
    /// still returned in suite order.
    pub async fn run_suite(&self, baseline: Arc<Baseline>) -> Vec<ScenarioOutcome> {
        if self.jobs <= 1 {
            let mut outcomes = Vec::with_capacity(self.suite.scenarios.len());
            for scenario in &self.suite.scenarios {
                let outcome = self.run_scenario(scenario, &baseline).await;
                report_verdict(&outcome);
                outcomes.push(outcome);
            }
            return outcomes;
        }

        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let mut handles = Vec::with_capacity(self.suite.scenarios.len());

        for index in 0..self.suite.scenarios.len() {
            let semaphore = Arc::clone(&semaphore);
            let baseline = Arc::clone(&baseline);
            let orchestrator = self.clone();

            let handle = tokio::spawn(async move {
                let scenario = &orchestrator.suite.scenarios[index];
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    let failure = AssertionFailure::Aborted {
                        message: "job limiter closed".to_string(),
                    };
                    return ScenarioOutcome::new(scenario).fail(failure, Instant::now());
                };
                let outcome = orchestrator.run_scenario(scenario, &baseline).await;
                report_verdict(&outcome);
                outcome
            });
            handles.push(handle);
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (handle, scenario) in handles.into_iter().zip(self.suite.scenarios.iter()) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    let failure = AssertionFailure::Aborted {
                        message: e.to_string(),
                    };
                    let outcome = ScenarioOutcome::new(scenario).fail(failure, Instant::now());
                    report_verdict(&outcome);
                    outcomes.push(outcome);
                }
            }
        }
        outcomes
    }

    async fn invoke(&self, label: &str, argv: &[String], workdir: &Path) -> RunResult {
        if self.verbose {
            print_status(format!(
                "[{}] {} {}",
                label,
                self.runner.executable().display(),
                argv.join(" ")
            ));
        }

        let run = self.runner.run(argv).await;
        self.log.record(
            CapturedArgs {
                scenario: label.to_string(),
                executable: self.runner.executable().display().to_string(),
                argv: argv.to_vec(),
                workdir: Some(workdir.display().to_string()),
            },
            run.to_captured(),
        );

        if self.verbose {
            print_captured(label, &run.stdout, &run.stderr);
        }
        run
    }

    /// Walk `root` on the blocking pool.
    async fn snapshot(&self, root: &Path) -> Result<Fingerprint, AssertionFailure> {
        let snapshotter = self.snapshotter.clone();
        let root = root.to_path_buf();
        match tokio::task::spawn_blocking(move || snapshotter.snapshot(&root)).await {
            Ok(result) => Ok(result?),
            Err(e) => Err(AssertionFailure::Aborted {
                message: format!("snapshot task failed: {}", e),
            }),
        }
    }

    fn release(&self, workdir: ScopedWorkdir) {
        let path = workdir.path().to_path_buf();
        if let Err(e) = workdir.release() {
            print_warning(format!(
                "Failed to remove working directory '{}': {}",
                path.display(),
                e
            ));
        }
    }
}

fn print_captured(label: &str, stdout: &str, stderr: &str) {
    for line in stdout.lines() {
        print_status(format!("[{label}] stdout: {line}"));
    }
    for line in stderr.lines() {
        print_status(format!("[{label}] stderr: {line}"));
    }
}

fn report_verdict(outcome: &ScenarioOutcome) {
    let detail = match outcome.file_count {
        Some(files) => format!(
            "{} ({}, {} files, {:.1}s)",
            outcome.name,
            outcome.kind,
            files,
            outcome.elapsed.as_secs_f64()
        ),
        None => format!("{} ({})", outcome.name, outcome.kind),
    };
    print_verdict(outcome.passed(), detail);
    for failure in &outcome.failures {
        print_status(format!("    {}: {}", failure.category(), failure));
        if let Some((stdout, stderr)) = failure.captured_output() {
            print_captured(&outcome.name, stdout, stderr);
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
