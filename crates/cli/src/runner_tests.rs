// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

fn sh(script: &str) -> Vec<String> {
    vec!["-c".to_string(), script.to_string()]
}

#[test]
fn test_launch_failure_is_sentinel() {
    let result = RunResult::launch_failure("boom");
    assert_eq!(result.code, SENTINEL_EXIT_CODE);
    assert_eq!(result.status, RunStatus::LaunchFailed);
    assert!(result.stdout.is_empty());
    assert_eq!(result.stderr, "boom");
    assert!(!result.is_success());
}

#[test]
fn test_to_captured_variants() {
    let result = RunResult::timed_out(Duration::from_secs(2), Duration::from_millis(2001));
    assert_eq!(
        result.to_captured(),
        CapturedOutcome::TimedOut { after_ms: 2001 }
    );

    let result = RunResult::launch_failure("missing");
    assert_eq!(
        result.to_captured(),
        CapturedOutcome::LaunchFailed {
            message: "missing".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_executable_returns_sentinel() {
    let runner = ProcessRunner::new("/nonexistent/astrostacker");
    let result = runner.run(&["--help".to_string()]).await;

    assert_eq!(result.status, RunStatus::LaunchFailed);
    assert_eq!(result.code, SENTINEL_EXIT_CODE);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("/nonexistent/astrostacker"));
}

#[cfg(unix)]
mod unix {
    use super::*;

    #[tokio::test]
    async fn test_captures_streams_separately() {
        let runner = ProcessRunner::new("sh");
        let result = runner.run(&sh("echo out; echo err >&2")).await;

        assert!(result.is_success());
        assert_eq!(result.status, RunStatus::Exited);
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_reports_real_exit_code() {
        let runner = ProcessRunner::new("sh");
        let result = runner.run(&sh("echo failing >&2; exit 3")).await;

        assert_eq!(result.status, RunStatus::Exited);
        assert_eq!(result.code, 3);
        assert!(!result.is_success());
        assert_eq!(result.stderr, "failing\n");
    }

    #[tokio::test]
    async fn test_passes_arguments_verbatim() {
        let runner = ProcessRunner::new("sh");
        let args = vec![
            "-c".to_string(),
            "printf '%s|' \"$@\"".to_string(),
            "sh".to_string(),
            "--crop".to_string(),
            "100x200,-50,70".to_string(),
        ];
        let result = runner.run(&args).await;
        assert_eq!(result.stdout, "--crop|100x200,-50,70|");
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let runner = ProcessRunner::new("sh").with_timeout(Some(Duration::from_millis(200)));
        let result = runner.run(&sh("sleep 10")).await;

        assert_eq!(result.status, RunStatus::TimedOut);
        assert_eq!(result.code, SENTINEL_EXIT_CODE);
        assert!(result.elapsed < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_timeout_kills_background_children() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new("sh")
            .with_timeout(Some(Duration::from_millis(200)))
            .with_current_dir(Some(dir.path().to_path_buf()));
        let result = runner.run(&sh("(sleep 1; touch late) & wait")).await;
        assert_eq!(result.status, RunStatus::TimedOut);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!dir.path().join("late").exists());
    }

    #[tokio::test]
    async fn test_fast_process_within_timeout() {
        let runner = ProcessRunner::new("sh").with_timeout(Some(Duration::from_secs(10)));
        let result = runner.run(&sh("exit 0")).await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_signal_is_reported() {
        let runner = ProcessRunner::new("sh");
        let result = runner.run(&sh("kill -9 $$")).await;

        assert_eq!(result.status, RunStatus::Signaled(9));
        assert_eq!(result.code, SENTINEL_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_current_dir_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new("sh").with_current_dir(Some(dir.path().to_path_buf()));
        let result = runner.run(&sh("touch marker")).await;

        assert!(result.is_success());
        assert!(dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_non_executable_file_returns_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-program");
        std::fs::write(&path, "plain text").unwrap();

        let result = ProcessRunner::new(&path).run(&[]).await;
        assert_eq!(result.status, RunStatus::LaunchFailed);
        assert_eq!(result.code, SENTINEL_EXIT_CODE);
    }
}
