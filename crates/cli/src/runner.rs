// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline process runner.

use astrocheck_capture::CapturedOutcome;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Exit code reported when no real exit status exists.
pub const SENTINEL_EXIT_CODE: i32 = -1;

/// How an invocation ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Process exited on its own; `code` is its exit status
    Exited,
    /// Process was terminated by a signal
    Signaled(i32),
    /// Process could not be started or its output could not be collected
    LaunchFailed,
    /// Wall-clock limit expired and the process was killed
    TimedOut,
}

/// One observation of the pipeline.
#[derive(Clone, Debug)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
    pub status: RunStatus,
    pub elapsed: Duration,
}

impl RunResult {
    /// Sentinel result for a process that never ran.
    pub fn launch_failure(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            code: SENTINEL_EXIT_CODE,
            status: RunStatus::LaunchFailed,
            elapsed: Duration::ZERO,
        }
    }

    pub fn timed_out(limit: Duration, elapsed: Duration) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Timed out after {}s", limit.as_secs_f64()),
            code: SENTINEL_EXIT_CODE,
            status: RunStatus::TimedOut,
            elapsed,
        }
    }

    fn from_output(output: std::process::Output, elapsed: Duration) -> Self {
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let (code, status) = match output.status.code() {
            Some(code) => (code, RunStatus::Exited),
            None => (SENTINEL_EXIT_CODE, RunStatus::Signaled(signal_of(&output.status))),
        };
        Self {
            stdout,
            stderr,
            code,
            status,
            elapsed,
        }
    }

    /// Process exited on its own with status 0.
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Exited && self.code == 0
    }

    /// Form recorded in the invocation log.
    pub fn to_captured(&self) -> CapturedOutcome {
        let duration_ms = self.elapsed.as_millis() as u64;
        match self.status {
            RunStatus::Exited => CapturedOutcome::Exited {
                code: self.code,
                duration_ms,
                stdout_bytes: self.stdout.len(),
                stderr_bytes: self.stderr.len(),
            },
            RunStatus::Signaled(signal) => CapturedOutcome::Signaled {
                signal,
                duration_ms,
            },
            RunStatus::LaunchFailed => CapturedOutcome::LaunchFailed {
                message: self.stderr.clone(),
            },
            RunStatus::TimedOut => CapturedOutcome::TimedOut {
                after_ms: duration_ms,
            },
        }
    }
}

#[cfg(unix)]
fn signal_of(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or(0)
}

#[cfg(not(unix))]
fn signal_of(_status: &std::process::ExitStatus) -> i32 {
    0
}

/// SIGKILL the process group led by `pid`.
#[cfg(unix)]
fn kill_group(pid: Option<u32>) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()) else {
        return;
    };
    // ESRCH just means the group is already gone.
    let _ = killpg(Pid::from_raw(pid), Signal::SIGKILL);
}

#[cfg(not(unix))]
fn kill_group(_pid: Option<u32>) {}

/// Runs the executable under test, one blocking observation per call.
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    executable: PathBuf,
    timeout: Option<Duration>,
    current_dir: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: None,
            current_dir: None,
        }
    }

    /// Kill the process and report [`RunStatus::TimedOut`] after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Directory the process is started in; relative input paths resolve here.
    pub fn with_current_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.current_dir = dir;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run the executable with `args` and wait for it.
    ///
    /// Never fails: launch errors come back as a sentinel [`RunResult`].
    pub async fn run(&self, args: &[String]) -> RunResult {
        let start = Instant::now();

        let mut cmd = Command::new(&self.executable);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        // Own process group, so a timeout reaches everything the pipeline spawned.
        #[cfg(unix)]
        cmd.process_group(0);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return RunResult::launch_failure(format!(
                    "Failed to launch '{}': {}",
                    self.executable.display(),
                    e
                ))
            }
        };

        let pid = child.id();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                // The child handle was dropped with the future; kill_on_drop ends it.
                Err(_) => {
                    kill_group(pid);
                    return RunResult::timed_out(limit, start.elapsed());
                }
            },
            None => child.wait_with_output().await,
        };

        match output {
            Ok(output) => RunResult::from_output(output, start.elapsed()),
            Err(e) => {
                let mut result =
                    RunResult::launch_failure(format!("Failed to collect process output: {}", e));
                result.elapsed = start.elapsed();
                result
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
