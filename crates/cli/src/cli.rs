// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command line interface.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Fingerprint-based functional tests for the AstroStacker pipeline
#[derive(Parser, Debug, Clone)]
#[command(name = "astrocheck", version, about)]
pub struct Cli {
    /// Pipeline executable under test
    #[arg(long, env = "AS_PATH", value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// TOML suite file (default: built-in functional suite)
    #[arg(long, value_name = "FILE")]
    pub suite: Option<PathBuf>,

    /// Input video, overriding the suite's input
    #[arg(long, env = "ASTROCHECK_INPUT", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Per-invocation timeout in seconds (0 disables)
    #[arg(long, env = "ASTROCHECK_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Run only the named scenario (can be specified multiple times)
    #[arg(long = "scenario", value_name = "NAME")]
    pub scenarios: Vec<String>,

    /// Scenarios to run concurrently
    #[arg(long, short = 'j', default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Parent directory for scenario working directories
    #[arg(long, env = "ASTROCHECK_WORK_ROOT", value_name = "DIR")]
    pub work_root: Option<PathBuf>,

    /// Write every pipeline invocation to a JSONL file
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Write a markdown report
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// List scenarios and exit
    #[arg(long)]
    pub list: bool,

    /// Print pipeline command lines and output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Timeout override; `Some(None)` disables the limit.
    pub fn timeout_override(&self) -> Option<Option<Duration>> {
        self.timeout.map(|secs| match secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        })
    }

    /// An executable is required unless only listing.
    pub fn validate(&self) -> Result<(), String> {
        if self.list && self.executable.is_none() {
            return Ok(());
        }
        self.require_executable().map(|_| ())
    }

    /// The pipeline executable, or the diagnostic for its absence.
    pub fn require_executable(&self) -> Result<&Path, String> {
        match self.executable.as_deref() {
            None => Err(
                "No pipeline executable given; pass --executable or set AS_PATH".to_string(),
            ),
            Some(exe) if exe.as_os_str().is_empty() => {
                Err("--executable must not be empty".to_string())
            }
            Some(exe) => Ok(exe),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
