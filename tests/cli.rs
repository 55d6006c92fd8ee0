use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;
use vitality_core::domain::ProfileData;
use vitality_core::storage::{JsonProfileStore, ProfileStore};

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vitality_cli").expect("binary built");
    cmd.env("VITALITY_HOME", home).env("NO_COLOR", "1");
    cmd
}

#[test]
fn version_prints_build_metadata() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .arg("version")
        .assert()
        .success()
        .stdout(contains("Vitality"))
        .stdout(contains("Profile schema: v1"));
}

#[test]
fn no_arguments_lists_commands() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("nutrition"));
}

#[test]
fn show_missing_profile_fails() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["show", "ghost"])
        .assert()
        .failure()
        .stderr(contains("Profile not found: ghost"));
}

#[test]
fn show_uses_configured_units() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.json"), r#"{ "unit_system": "imperial" }"#).unwrap();
    let store = JsonProfileStore::new(Some(home.path().to_path_buf())).unwrap();
    let profile = ProfileData {
        age: Some(52),
        height_cm: Some(180.0),
        weight_kg: Some(100.0),
        ..ProfileData::default()
    };
    store.save("p1", &profile).unwrap();

    cli(home.path())
        .args(["show", "p1"])
        .assert()
        .success()
        .stdout(contains("Age: 52"))
        .stdout(contains("Weight (imperial): 220.5 lb"));

    cli(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("p1"));
}

#[test]
fn nutrition_entries_feed_the_daily_summary() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args([
            "nutrition", "add", "p1", "Oats", "80", "300", "10", "54", "5", "--date", "2024-03-01",
        ])
        .assert()
        .success()
        .stdout(contains("Logged 80 g of Oats on 2024-03-01"));

    cli(home.path())
        .args(["nutrition", "summary", "p1", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(contains("Total: 300 kcal"))
        .stdout(contains("Energy 300/2000 kcal (15%)"));

    cli(home.path())
        .args(["nutrition", "summary", "p1", "--date", "2024-03-02"])
        .assert()
        .success()
        .stdout(contains("No entries logged for this day."));
}

#[test]
fn nutrition_rejects_malformed_amounts() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["nutrition", "add", "p1", "Oats", "lots", "300", "10", "54", "5"])
        .assert()
        .failure()
        .stderr(contains("grams must be a non-negative number"));
}

#[test]
fn trailing_date_flag_without_value_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["nutrition", "add", "p1", "Oats", "80", "300", "10", "54", "5", "--date"])
        .assert()
        .failure()
        .stderr(contains("`--date` needs a value"));
    assert!(!home.path().join("diaries").join("p1.json").exists());
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .arg("verison")
        .assert()
        .failure()
        .stdout(contains("Suggestion: `version`?"))
        .stderr(contains("unknown command `verison`"));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.json"), "{ not json").unwrap();
    cli(home.path())
        .arg("version")
        .assert()
        .failure()
        .stderr(contains("Configuration error"));
}
