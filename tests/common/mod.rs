//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use hamper_forecast::pipeline::Dataset;
use polars::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Create a small pickup-records DataFrame with known characteristics
///
/// This DataFrame includes:
/// - `Family_id`, `Family_size`, `hamper_count`: numeric columns
/// - `Day_of_week`, `Special_Event`, `Status`: categorical text columns
/// - `collect_scheduled_date`: 5 parseable dates across 3 months, one garbage value, one null
/// - `Pickup_date`: 4 parseable dates across 2 months (different from the scheduled ones)
pub fn create_pickup_dataframe() -> DataFrame {
    df! {
        "Family_id" => [101i64, 102, 103, 104, 105, 106, 107],
        "Day_of_week" => ["Friday", "Monday", "Friday", "Sunday", "Friday", "Monday", "Tuesday"],
        "Family_size" => [4i64, 7, 4, 2, 13, 7, 4],
        "Special_Event" => [
            "Ramadan", "Ramadan", "Eid al-Fitr", "Christmas Day",
            "Ramadan", "Halloween", "Family Day",
        ],
        "Status" => ["Active", "Active", "Closed", "Pending", "Active", "Active", "Closed"],
        "collect_scheduled_date" => [
            Some("2023-11-03"), Some("2023-11-20"), Some("2024-01-05"), Some("not scheduled"),
            None, Some("2024-03-15"), Some("2024-03-16 10:30:00"),
        ],
        "Pickup_date" => [
            Some("2023-12-01"), None, Some("2024-01-06"), Some("2024-01-07"),
            Some(""), Some("2024-01-20"), None,
        ],
        "hamper_count" => [2.0f64, 3.0, 2.0, 1.0, 5.0, 3.0, 2.0],
    }
    .unwrap()
}

pub fn create_pickup_dataset() -> Dataset {
    Dataset::from_frame(create_pickup_dataframe())
}

/// Create a temporary directory with a CSV file written from a DataFrame
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("pickups.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write raw bytes to a file inside a fresh temporary directory
pub fn create_temp_file(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    (temp_dir, path)
}

/// Serialize a model document into `dir`
pub fn write_artifact(dir: &Path, name: &str, artifact: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(artifact).unwrap()).unwrap();
    path
}

/// A one-layer linear network over 7 inputs: `w . x + b`
pub fn linear_artifact(weights: [f64; 7], bias: f64) -> Value {
    json!({
        "input_shape": [1, 7],
        "layers": [
            {
                "type": "dense",
                "kernel": weights.iter().map(|w| vec![*w]).collect::<Vec<_>>(),
                "bias": [bias],
            }
        ]
    })
}

/// Linear model whose output for `[3, 4, 1, 7, 15, 6, 2024]` is 15.5
pub fn sum_of_first_four_artifact() -> Value {
    linear_artifact([1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0], 0.5)
}

/// The documented example request
pub fn ramadan_selections() -> hamper_forecast::pipeline::Selections {
    hamper_forecast::pipeline::Selections {
        special_event: "Ramadan".to_string(),
        day_of_week: "Friday".to_string(),
        status: "Active".to_string(),
        family_size: 7,
        day: 15,
        month: 6,
        year: 2024,
    }
}

/// Assert that two floats agree to within `tol`
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} (±{}), got {}",
        expected,
        tol,
        actual
    );
}
