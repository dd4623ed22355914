// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured invocation data types.

use crate::duration_serde;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// One recorded run of the pipeline executable
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapturedInvocation {
    /// Sequence number
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since capture started
    #[serde(rename = "elapsed_ms", with = "duration_serde")]
    pub elapsed: Duration,

    /// What was invoked
    pub args: CapturedArgs,

    /// How the process ended
    pub outcome: CapturedOutcome,
}

/// Invocation arguments
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedArgs {
    /// Scenario name, or "baseline" for the setup run
    pub scenario: String,
    pub executable: String,
    pub argv: Vec<String>,
    pub workdir: Option<String>,
}

/// Process outcome
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapturedOutcome {
    Exited {
        code: i32,
        duration_ms: u64,
        stdout_bytes: usize,
        stderr_bytes: usize,
    },
    Signaled {
        signal: i32,
        duration_ms: u64,
    },
    LaunchFailed {
        message: String,
    },
    TimedOut {
        after_ms: u64,
    },
}

impl CapturedOutcome {
    /// Anything other than a clean zero exit.
    pub fn is_failure(&self) -> bool {
        !matches!(self, CapturedOutcome::Exited { code: 0, .. })
    }
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
