//! Tests for CLI argument parsing and the command-line views

use assert_cmd::Command;
use clap::Parser;
use hamper_forecast::cli::{Cli, Commands};
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["hamper"]);

    assert!(cli.command.is_none(), "No subcommand starts the interactive session");
    assert_eq!(cli.data, PathBuf::from("Islamic_Food_Drive_cleaned_data.csv"));
    assert_eq!(cli.model, PathBuf::from("lstm_model.json"));
    assert_eq!(cli.encoding, "latin1");
    assert_eq!(cli.separator, b',');
    assert_eq!(cli.infer_schema_length, 10000);
    assert!(!cli.cache_model, "Models are re-read per request by default");
}

#[test]
fn test_predict_defaults() {
    let cli = Cli::parse_from(["hamper", "predict"]);

    let Some(Commands::Predict(args)) = cli.command else {
        panic!("Expected the predict subcommand");
    };
    let selections = args.selections();
    assert_eq!(selections.special_event, "New Year's Day");
    assert_eq!(selections.day_of_week, "Monday");
    assert_eq!(selections.status, "Active");
    assert_eq!(selections.family_size, 7);
    assert_eq!(selections.day, 15);
    assert_eq!(selections.month, 6);
    assert_eq!(selections.year, 2024);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "hamper",
        "explore",
        "--data",
        "pickups.tsv",
        "--separator",
        "tab",
        "--encoding",
        "utf-8",
        "--export",
        "eda.json",
    ]);

    assert_eq!(cli.data, PathBuf::from("pickups.tsv"));
    assert_eq!(cli.separator, b'\t');
    let options = cli.load_options();
    assert_eq!(options.encoding, "utf-8");
    assert_eq!(options.separator, b'\t');
    match cli.command {
        Some(Commands::Explore { export }) => assert_eq!(export, Some(PathBuf::from("eda.json"))),
        other => panic!("Expected explore, got {:?}", other),
    }
}

#[test]
fn test_numeric_inputs_are_range_checked() {
    for (flag, value) in [
        ("--family-size", "0"),
        ("--family-size", "14"),
        ("--day", "32"),
        ("--month", "13"),
        ("--year", "2022"),
        ("--year", "2026"),
    ] {
        let result = Cli::try_parse_from(["hamper", "predict", flag, value]);
        assert!(result.is_err(), "{} {} should be rejected", flag, value);
    }

    let result = Cli::try_parse_from([
        "hamper",
        "predict",
        "--family-size",
        "13",
        "--year",
        "2025",
    ]);
    assert!(result.is_ok());
}

#[test]
fn test_bad_separator_is_rejected() {
    assert!(Cli::try_parse_from(["hamper", "overview", "--separator", ";;"]).is_err());
}

#[test]
fn test_overview_command() {
    Command::cargo_bin("hamper")
        .unwrap()
        .arg("overview")
        .assert()
        .success()
        .stdout(predicate::str::contains("Abstract"))
        .stdout(predicate::str::contains("Problem Statement"));
}

#[test]
fn test_predict_command_prints_count() {
    let temp_dir = TempDir::new().unwrap();
    let model = common::write_artifact(
        temp_dir.path(),
        "lstm_model.json",
        &common::sum_of_first_four_artifact(),
    );

    Command::cargo_bin("hamper")
        .unwrap()
        .args(["predict", "--special-event", "Ramadan", "--day-of-week", "Friday"])
        .arg("--model")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("Predicted Number of Food Hampers: 15"));
}

#[test]
fn test_predict_command_rejects_unknown_label() {
    Command::cargo_bin("hamper")
        .unwrap()
        .args(["predict", "--special-event", "", "--model", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown Special_Event label ''"));
}

#[test]
fn test_predict_command_reports_missing_model() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("hamper")
        .unwrap()
        .arg("predict")
        .arg("--model")
        .arg(temp_dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read model artifact"));
}

#[test]
fn test_explore_command_exports_json() {
    let mut df = common::create_pickup_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);
    let export_path = temp_dir.path().join("eda.json");

    Command::cargo_bin("hamper")
        .unwrap()
        .arg("explore")
        .arg("--data")
        .arg(&csv_path)
        .arg("--export")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Day of Week"));

    let content = std::fs::read_to_string(&export_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["metadata"]["rows"], 7);
    assert!(json["day_of_week"]["data"].is_array());
    assert!(json["correlation"]["columns"].is_array());
}

#[test]
fn test_explore_command_fails_on_missing_dataset() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("hamper")
        .unwrap()
        .arg("explore")
        .arg("--data")
        .arg(temp_dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read dataset file"));
}
