// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::config::ScenarioSpec;
use astrocheck_fingerprint::CategoryRule;
use std::io::Write;

fn write_suite(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn config_with(scenarios: Vec<ScenarioSpec>) -> SuiteConfig {
    SuiteConfig {
        scenarios,
        ..SuiteConfig::default()
    }
}

fn validation_message(result: Result<Suite, SuiteError>) -> String {
    match result {
        Err(SuiteError::Validation(msg)) => msg,
        other => panic!("expected validation error, got {:?}", other.map(|s| s.name)),
    }
}

#[test]
fn test_builtin_suite_is_valid() {
    let suite = Suite::builtin().unwrap();
    assert_eq!(suite.scenarios.len(), 4);
    assert_eq!(suite.input, PathBuf::from(DEFAULT_INPUT));
    assert_eq!(suite.timeout, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));
    assert_eq!(suite.rules, CategoryRules::default());
    assert!(suite.scenarios.iter().all(|s| s.input == suite.input));
}

#[test]
fn test_load_resolves_input_relative_to_suite_file() {
    let file = write_suite(
        r#"
        input = "clips/moon.mp4"

        [[scenarios]]
        name = "base"
        kind = "base_configuration"

        [[scenarios]]
        name = "other_clip"
        kind = "effective_transform"
        input = "/abs/other.mp4"
        "#,
    );

    let suite = Suite::load(file.path()).unwrap();
    let dir = file.path().parent().unwrap();
    assert_eq!(suite.input, dir.join("clips/moon.mp4"));
    assert_eq!(suite.scenarios[0].input, dir.join("clips/moon.mp4"));
    assert_eq!(suite.scenarios[1].input, PathBuf::from("/abs/other.mp4"));
}

#[yare::parameterized(
    base = { ScenarioKind::BaseConfiguration },
    additive = { ScenarioKind::AdditiveStage },
    noop = { ScenarioKind::NoOpTransform },
)]
fn test_input_override_rejected_for_baseline_relations(kind: ScenarioKind) {
    let mut spec = ScenarioSpec::new("other_clip", kind).excluding([ArtifactCategory::Aligned]);
    spec.input = Some(PathBuf::from("/abs/other.mp4"));
    let msg = validation_message(Suite::from_config(config_with(vec![spec]), None));
    assert!(msg.contains("cannot override the suite input"));
}

#[test]
fn test_input_override_matching_suite_input_allowed() {
    let mut spec = ScenarioSpec::new("same_clip", ScenarioKind::BaseConfiguration);
    spec.input = Some(PathBuf::from(DEFAULT_INPUT));
    let suite = Suite::from_config(config_with(vec![spec]), None).unwrap();
    assert_eq!(suite.scenarios[0].input, suite.input);
}

#[test]
fn test_load_missing_file() {
    let err = Suite::load(Path::new("/nonexistent/suite.toml")).unwrap_err();
    assert!(matches!(err, SuiteError::Io { .. }));
}

#[test]
fn test_load_invalid_toml() {
    let file = write_suite("scenarios = 3");
    let err = Suite::load(file.path()).unwrap_err();
    assert!(matches!(err, SuiteError::Toml(_)));
}

#[test]
fn test_timeout_zero_disables() {
    let config = SuiteConfig {
        timeout_secs: Some(0),
        ..SuiteConfig::default()
    };
    let suite = Suite::from_config(config, None).unwrap();
    assert_eq!(suite.timeout, None);
}

#[test]
fn test_duplicate_names_rejected() {
    let config = config_with(vec![
        ScenarioSpec::new("a", ScenarioKind::BaseConfiguration),
        ScenarioSpec::new("a", ScenarioKind::NoOpTransform),
    ]);
    let msg = validation_message(Suite::from_config(config, None));
    assert!(msg.contains("Duplicate scenario name 'a'"));
}

#[test]
fn test_empty_name_rejected() {
    let config = config_with(vec![ScenarioSpec::new("  ", ScenarioKind::BaseConfiguration)]);
    let msg = validation_message(Suite::from_config(config, None));
    assert!(msg.contains("must not be empty"));
}

#[test]
fn test_additive_stage_requires_exclusions() {
    let config = config_with(vec![ScenarioSpec::new(
        "split",
        ScenarioKind::AdditiveStage,
    )
    .with_args(["--split", "15,0"])]);
    let msg = validation_message(Suite::from_config(config, None));
    assert!(msg.contains("additive stage"));
}

#[test]
fn test_unknown_exclusion_category_rejected() {
    let config = config_with(vec![ScenarioSpec::new("split", ScenarioKind::AdditiveStage)
        .excluding([ArtifactCategory::Custom("alinged".to_string())])]);
    let msg = validation_message(Suite::from_config(config, None));
    assert!(msg.contains("unknown category 'alinged'"));
}

#[test]
fn test_custom_categories_replace_defaults() {
    let config = SuiteConfig {
        categories: vec![CategoryRule::new(
            ArtifactCategory::Custom("registered".to_string()),
            ["registered"],
        )],
        scenarios: vec![ScenarioSpec::new("s", ScenarioKind::AdditiveStage)
            .excluding([ArtifactCategory::Custom("registered".to_string())])],
        ..SuiteConfig::default()
    };
    let suite = Suite::from_config(config, None).unwrap();
    assert_eq!(suite.rules.len(), 1);
    assert!(!suite.rules.contains(&ArtifactCategory::Aligned));

    // Default categories are no longer valid exclusions
    let config = SuiteConfig {
        categories: vec![CategoryRule::new(
            ArtifactCategory::Custom("registered".to_string()),
            ["registered"],
        )],
        scenarios: vec![ScenarioSpec::new("s", ScenarioKind::AdditiveStage)
            .excluding([ArtifactCategory::Aligned])],
        ..SuiteConfig::default()
    };
    assert!(Suite::from_config(config, None).is_err());
}

#[test]
fn test_category_without_markers_rejected() {
    let config = SuiteConfig {
        categories: vec![CategoryRule::new(
            ArtifactCategory::Aligned,
            Vec::<String>::new(),
        )],
        ..SuiteConfig::default()
    };
    let msg = validation_message(Suite::from_config(config, None));
    assert!(msg.contains("non-empty marker"));
}

#[test]
fn test_select_keeps_suite_order() {
    let suite = Suite::builtin()
        .unwrap()
        .select(&["crop_option".to_string(), "base_options".to_string()])
        .unwrap();
    let names: Vec<&str> = suite.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["base_options", "crop_option"]);
}

#[test]
fn test_select_empty_keeps_all() {
    let suite = Suite::builtin().unwrap().select(&[]).unwrap();
    assert_eq!(suite.scenarios.len(), 4);
}

#[test]
fn test_select_unknown_rejected() {
    let msg = validation_message(Suite::builtin().unwrap().select(&["nope".to_string()]));
    assert!(msg.contains("Unknown scenario 'nope'"));
}

#[test]
fn test_with_input_overrides_everything() {
    let suite = Suite::builtin()
        .unwrap()
        .with_input(PathBuf::from("/data/jupiter.mp4"));
    assert_eq!(suite.input, PathBuf::from("/data/jupiter.mp4"));
    assert!(suite
        .scenarios
        .iter()
        .all(|s| s.input == PathBuf::from("/data/jupiter.mp4")));
}
