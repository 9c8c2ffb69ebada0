//! Integration tests for Settings layered loading.
//!
//! These tests pass an explicit local config file, so the working directory's
//! `.matprint.toml` is never consulted.

use std::fs;

use matprint::application::printer::MAX_TUNABLE;
use matprint::application::ApplicationError;
use matprint::config::{Settings, LOCAL_CONFIG_FILE};
use rstest::rstest;
use tempfile::TempDir;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LOCAL_CONFIG_FILE);
    fs::write(&path, "precision = 5\nwidth_buffer = 6\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.precision, 5);
    assert_eq!(settings.width_buffer, 6);
}

#[test]
fn given_partial_local_config_when_load_then_unspecified_keys_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LOCAL_CONFIG_FILE);
    fs::write(&path, "precision = 1\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.precision, 1);
    assert_eq!(settings.width_buffer, Settings::default().width_buffer);
}

#[rstest]
#[case::negative_precision("precision = -1\n")]
#[case::negative_width_buffer("width_buffer = -3\n")]
#[case::not_a_number("precision = \"three\"\n")]
#[case::precision_above_limit("precision = 70000\n")]
#[case::width_buffer_above_limit("width_buffer = 4097\n")]
fn given_invalid_value_when_load_then_config_error(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LOCAL_CONFIG_FILE);
    fs::write(&path, content).unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "got {:?}", err);
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn given_template_when_written_and_loaded_then_matches_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LOCAL_CONFIG_FILE);
    fs::write(&path, Settings::template()).unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_largest_accepted_values_when_load_then_kept() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LOCAL_CONFIG_FILE);
    fs::write(&path, format!("precision = {0}\nwidth_buffer = {0}\n", MAX_TUNABLE)).unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.precision, MAX_TUNABLE);
    assert_eq!(settings.width_buffer, MAX_TUNABLE);
}
