// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All environment variables astrocheck reads are defined here. The CLI
//! binds the same names through clap; these accessors serve library callers
//! and the test suites.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;
use std::time::Duration;

/// `AS_PATH` — Path to the pipeline executable under test.
pub fn as_path() -> Option<PathBuf> {
    std::env::var(names::AS_PATH)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `ASTROCHECK_INPUT` — Input video override.
pub fn input() -> Option<PathBuf> {
    std::env::var(names::ASTROCHECK_INPUT)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `ASTROCHECK_TIMEOUT_SECS` — Per-invocation wall-clock limit.
///
/// `None` when unset or unparsable; `Some(None)` for `0`, which disables
/// the limit.
pub fn timeout() -> Option<Option<Duration>> {
    var_u64(names::ASTROCHECK_TIMEOUT_SECS).map(|secs| match secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    })
}

/// `ASTROCHECK_WORK_ROOT` — Parent directory for scenario working dirs.
pub fn work_root() -> Option<PathBuf> {
    std::env::var(names::ASTROCHECK_WORK_ROOT)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `CARGO_BIN_EXE_astrocheck` — Path to compiled binary (set by cargo test).
pub fn cargo_bin_exe() -> Option<String> {
    std::env::var(names::CARGO_BIN_EXE_ASTROCHECK).ok()
}

fn var_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
