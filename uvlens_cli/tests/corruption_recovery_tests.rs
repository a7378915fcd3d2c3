//! Corruption recovery tests for uvlens.
//!
//! These tests verify the system can handle:
//! - Corrupted profile files
//! - Profiles with out-of-range indices
//! - Broken config files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cli() -> Command {
    Command::cargo_bin("uvlens").expect("Failed to find uvlens binary")
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn default_config(temp_dir: &TempDir) -> PathBuf {
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "").expect("Failed to write config");
    path
}

#[test]
fn test_corrupted_profile_is_reported() {
    let temp_dir = setup_test_dir();
    let config = default_config(&temp_dir);

    fs::write(temp_dir.path().join("uv_profile.json"), "{ invalid json }}}}")
        .expect("Failed to write corrupted profile");

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .args(["check", "--uv", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed"))
        .stderr(predicate::str::contains("retry may succeed"));
}

#[test]
fn test_setup_repairs_corrupted_profile() {
    let temp_dir = setup_test_dir();
    let config = default_config(&temp_dir);
    let profile_path = temp_dir.path().join("uv_profile.json");

    fs::write(&profile_path, "not json at all").expect("Failed to write corrupted profile");

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .args(["setup", "--skin-type", "3", "--sunscreen", "2", "--time-outdoors", "4"])
        .assert()
        .success();

    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&profile_path).unwrap()).unwrap();
    assert_eq!(record["skinType"], 3);
    assert_eq!(record["sunscreenUsage"], 2);
    assert_eq!(record["timeOutdoors"], 4);
}

#[test]
fn test_partial_setup_over_corrupted_profile_fails() {
    let temp_dir = setup_test_dir();
    let config = default_config(&temp_dir);
    let profile_path = temp_dir.path().join("uv_profile.json");

    fs::write(&profile_path, "not json at all").expect("Failed to write corrupted profile");

    // Nothing to merge with, so every field must be given
    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .args(["setup", "--skin-type", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing --sunscreen"));

    assert_eq!(fs::read_to_string(&profile_path).unwrap(), "not json at all");
}

#[test]
fn test_out_of_range_profile_still_renders() {
    let temp_dir = setup_test_dir();
    let config = default_config(&temp_dir);

    // Written by hand, bypassing setup validation
    fs::write(
        temp_dir.path().join("uv_profile.json"),
        r#"{"skinType":9,"sunscreenUsage":9,"timeOutdoors":9,"environment":9}"#,
    )
    .unwrap();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .args(["check", "--uv", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MODERATE RISK"))
        .stdout(predicate::str::contains("Time to burn:    N/A"));
}

#[test]
fn test_broken_config_fails() {
    let temp_dir = setup_test_dir();
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[assessment\nforecast_hours = ").unwrap();

    cli()
        .arg("--config")
        .arg(&config)
        .arg("profile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOML error"));
}
