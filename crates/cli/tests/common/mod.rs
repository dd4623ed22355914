// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for harness integration tests.

#![allow(dead_code)]
#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the binary reads through clap.
pub const HARNESS_ENV: [&str; 4] = [
    "AS_PATH",
    "ASTROCHECK_INPUT",
    "ASTROCHECK_TIMEOUT_SECS",
    "ASTROCHECK_WORK_ROOT",
];

/// Shell stand-in for the stacking pipeline.
///
/// Writes 14 files for the default invocation, 22 with `--split`, and 20
/// with `--crop`.
pub fn fake_pipeline() -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fake_pipeline.sh");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        if mode & 0o111 == 0 {
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }
    path
}

/// The harness binary with a clean environment.
pub fn astrocheck() -> Command {
    let mut cmd = Command::cargo_bin("astrocheck").unwrap();
    for name in HARNESS_ENV {
        cmd.env_remove(name);
    }
    cmd
}

/// Scratch area with an input video, a work root and suite files.
pub struct Workspace {
    dir: TempDir,
    pub input: PathBuf,
    pub work_root: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("moon.mp4");
        std::fs::write(&input, b"moon video stand-in").unwrap();
        let work_root = dir.path().join("work");
        std::fs::create_dir(&work_root).unwrap();
        Self {
            dir,
            input,
            work_root,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a suite file; `{input}` in `content` is replaced with the input path.
    pub fn write_suite(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let content = content.replace("{input}", &self.input.display().to_string());
        std::fs::write(&path, content).unwrap();
        path
    }

    /// The standard four-scenario suite, sized for the fake pipeline.
    pub fn standard_suite(&self) -> PathBuf {
        self.write_suite("suite.toml", STANDARD_SUITE)
    }

    /// Harness command pointed at the fake pipeline and this workspace.
    pub fn command(&self) -> Command {
        let mut cmd = astrocheck();
        cmd.arg("--executable")
            .arg(fake_pipeline())
            .arg("--work-root")
            .arg(&self.work_root);
        cmd
    }

    pub fn work_root_is_empty(&self) -> bool {
        std::fs::read_dir(&self.work_root).unwrap().next().is_none()
    }
}

pub const STANDARD_SUITE: &str = r#"
name = "fake-functional"
input = "{input}"
timeout_secs = 30

[[scenarios]]
name = "base_options"
kind = "base_configuration"
expected_file_count = 14

[[scenarios]]
name = "split_option"
kind = "additive_stage"
args = ["--split", "15,0"]
expected_file_count = 22
exclude = ["aligned", "enhanced", "stacked"]

[[scenarios]]
name = "noop_crop_option"
kind = "no_op_transform"
args = ["--crop", "10000x10000,0,0"]
expected_file_count = 20

[[scenarios]]
name = "crop_option"
kind = "effective_transform"
args = ["--crop", "100x200,-50,70"]
expected_file_count = 20
"#;
