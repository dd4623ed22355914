// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Functional regression harness for the AstroStacker pipeline.
//!
//! The pipeline is treated as a black box. Each scenario runs it once in a
//! fresh working directory, fingerprints every file it wrote, and compares
//! the set of content digests against a baseline run. Where files live and
//! how often content repeats do not matter; only which content exists does.

pub mod assertion;
/// Re-exported capture types from the astrocheck-capture crate.
pub mod capture {
    pub use astrocheck_capture::{CaptureLog, CapturedArgs, CapturedInvocation, CapturedOutcome};
}
#[doc(hidden)]
pub mod cli;
pub mod config;
pub mod env;
pub mod orchestrator;
#[doc(hidden)]
pub mod output_diagnostic;
pub mod report;
pub mod runner;
pub mod suite;
pub mod workdir;

pub use orchestrator::{Baseline, Orchestrator, ScenarioOutcome, SetupError};
pub use report::{exit_codes, SuiteReport};
pub use runner::{ProcessRunner, RunResult, RunStatus};
pub use suite::{Scenario, Suite, SuiteError};
