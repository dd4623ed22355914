// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_minimal_suite_parses_with_defaults() {
    let config: SuiteConfig = toml::from_str("").unwrap();
    assert_eq!(config.name, "astrostacker");
    assert!(config.input.is_none());
    assert!(config.timeout_secs.is_none());
    assert_eq!(config.symlinks, SymlinkPolicy::Skip);
    assert!(config.categories.is_empty());
    assert!(config.scenarios.is_empty());
}

#[test]
fn test_full_suite_parses() {
    let config: SuiteConfig = toml::from_str(
        r#"
        name = "moon"
        input = "video-files/moon.mp4"
        timeout_secs = 120
        symlinks = "follow"

        [[categories]]
        name = "aligned"
        markers = ["aligned"]

        [[categories]]
        name = "transparent"
        markers = ["transparent", "alpha"]

        [[scenarios]]
        name = "split"
        kind = "additive_stage"
        args = ["--split", "15,0"]
        expected_file_count = 260
        exclude = ["aligned"]

        [[scenarios]]
        name = "failing"
        kind = "base_configuration"
        expected_exit_code = 1
        "#,
    )
    .unwrap();

    assert_eq!(config.name, "moon");
    assert_eq!(config.timeout_secs, Some(120));
    assert_eq!(config.symlinks, SymlinkPolicy::Follow);
    assert_eq!(config.categories.len(), 2);
    assert_eq!(
        config.categories[1].category,
        ArtifactCategory::Custom("transparent".to_string())
    );

    let split = &config.scenarios[0];
    assert_eq!(split.kind, ScenarioKind::AdditiveStage);
    assert_eq!(split.args, vec!["--split", "15,0"]);
    assert_eq!(split.expected_file_count, Some(260));
    assert_eq!(split.expected_exit_code, 0);
    assert_eq!(split.exclude, vec![ArtifactCategory::Aligned]);

    assert_eq!(config.scenarios[1].expected_exit_code, 1);
}

#[test]
fn test_unknown_fields_rejected() {
    let result: Result<SuiteConfig, _> = toml::from_str(
        r#"
        [[scenarios]]
        name = "x"
        kind = "base_configuration"
        flags = ["--crop"]
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_unknown_kind_rejected() {
    let result: Result<SuiteConfig, _> = toml::from_str(
        r#"
        [[scenarios]]
        name = "x"
        kind = "mystery"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_builtin_suite_matches_functional_tests() {
    let suite = builtin_suite();
    let names: Vec<&str> = suite.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["base_options", "split_option", "noop_crop_option", "crop_option"]
    );

    let split = &suite.scenarios[1];
    assert_eq!(split.args, vec!["--split", "15,0"]);
    assert_eq!(split.expected_file_count, Some(260));
    assert_eq!(split.exclude.len(), 3);

    let crop = &suite.scenarios[3];
    assert_eq!(crop.kind, ScenarioKind::EffectiveTransform);
    assert_eq!(crop.args, vec!["--crop", "100x200,-50,70"]);
    assert_eq!(crop.expected_file_count, Some(304));
}

#[test]
fn test_builtin_suite_serializes_to_toml() {
    let text = toml::to_string(&builtin_suite()).unwrap();
    let back: SuiteConfig = toml::from_str(&text).unwrap();
    assert_eq!(back.scenarios.len(), 4);
    assert_eq!(back.scenarios[2].kind, ScenarioKind::NoOpTransform);
}

#[test]
fn test_kind_display() {
    assert_eq!(ScenarioKind::AdditiveStage.to_string(), "additive stage");
    assert_eq!(ScenarioKind::NoOpTransform.to_string(), "no-op transform");
}
