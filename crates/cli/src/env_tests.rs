// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn as_path_returns_none_when_unset() {
    std::env::remove_var(AS_PATH);
    assert_eq!(as_path(), None);
}

#[test]
#[serial]
fn as_path_returns_none_when_empty() {
    std::env::set_var(AS_PATH, "");
    let result = as_path();
    std::env::remove_var(AS_PATH);
    assert_eq!(result, None);
}

#[test]
#[serial]
fn as_path_returns_path_when_set() {
    std::env::set_var(AS_PATH, "/opt/astrostacker/AstroStacker");
    let result = as_path();
    std::env::remove_var(AS_PATH);
    assert_eq!(
        result,
        Some(PathBuf::from("/opt/astrostacker/AstroStacker"))
    );
}

#[test]
#[serial]
fn timeout_parses_seconds() {
    std::env::set_var(ASTROCHECK_TIMEOUT_SECS, "90");
    let result = timeout();
    std::env::remove_var(ASTROCHECK_TIMEOUT_SECS);
    assert_eq!(result, Some(Some(Duration::from_secs(90))));
}

#[test]
#[serial]
fn timeout_ignores_garbage() {
    std::env::set_var(ASTROCHECK_TIMEOUT_SECS, "soon");
    let result = timeout();
    std::env::remove_var(ASTROCHECK_TIMEOUT_SECS);
    assert_eq!(result, None);
}

#[test]
#[serial]
fn work_root_and_input_return_paths_when_set() {
    std::env::set_var(ASTROCHECK_WORK_ROOT, "/scratch");
    std::env::set_var(ASTROCHECK_INPUT, "video-files/moon.mp4");
    let root = work_root();
    let input = input();
    std::env::remove_var(ASTROCHECK_WORK_ROOT);
    std::env::remove_var(ASTROCHECK_INPUT);
    assert_eq!(root, Some(PathBuf::from("/scratch")));
    assert_eq!(input, Some(PathBuf::from("video-files/moon.mp4")));
}

#[test]
#[serial]
fn timeout_zero_disables_limit() {
    std::env::set_var(ASTROCHECK_TIMEOUT_SECS, "0");
    let result = timeout();
    std::env::remove_var(ASTROCHECK_TIMEOUT_SECS);
    assert_eq!(result, Some(None));
}

#[test]
#[serial]
fn work_root_returns_none_when_empty() {
    std::env::set_var(ASTROCHECK_WORK_ROOT, "");
    let result = work_root();
    std::env::remove_var(ASTROCHECK_WORK_ROOT);
    assert_eq!(result, None);
}
