//! JSON export of the exploration aggregates

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CategoryFrequencies, CorrelationMatrix, MonthlyCounts, SchemaError};
use crate::report::EdaReport;

/// Metadata about the export run
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// hamper-forecast version
    pub version: String,
    /// Dataset file path
    pub dataset_file: String,
    /// Number of records in the dataset
    pub rows: usize,
}

/// One section: its data, or the schema error that prevented it
#[derive(Debug, Serialize)]
pub struct SectionExport<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> SectionExport<T> {
    fn from_result<S>(result: &Result<S, SchemaError>, convert: impl FnOnce(&S) -> T) -> Self {
        match result {
            Ok(value) => Self {
                data: Some(convert(value)),
                error: None,
            },
            Err(e) => Self {
                data: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    /// Percentage of non-null records
    pub share: f64,
}

#[derive(Debug, Serialize)]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ValueCount {
    pub value: i64,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CorrelationExport {
    pub columns: Vec<String>,
    /// Row-major coefficients, null where undefined
    pub values: Vec<Vec<Option<f64>>>,
}

/// Complete export document
#[derive(Debug, Serialize)]
pub struct EdaExport {
    pub metadata: ExportMetadata,
    pub day_of_week: SectionExport<Vec<CategoryCount>>,
    pub scheduled_per_month: SectionExport<Vec<MonthCount>>,
    pub pickups_per_month: SectionExport<Vec<MonthCount>>,
    pub family_size: SectionExport<Vec<ValueCount>>,
    pub special_event: SectionExport<Vec<CategoryCount>>,
    pub status: SectionExport<Vec<CategoryCount>>,
    pub correlation: CorrelationExport,
}

impl EdaExport {
    pub fn from_report(report: &EdaReport, dataset_file: &str) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                dataset_file: dataset_file.to_string(),
                rows: report.rows,
            },
            day_of_week: SectionExport::from_result(&report.day_of_week, category_counts),
            scheduled_per_month: SectionExport::from_result(
                &report.scheduled_monthly,
                month_counts,
            ),
            pickups_per_month: SectionExport::from_result(&report.pickup_monthly, month_counts),
            family_size: SectionExport::from_result(&report.family_size, value_counts),
            special_event: SectionExport::from_result(&report.special_event, category_counts),
            status: SectionExport::from_result(&report.status, category_counts),
            correlation: correlation_export(&report.correlation),
        }
    }
}

fn category_counts(frequencies: &CategoryFrequencies) -> Vec<CategoryCount> {
    let total = frequencies.total().max(1) as f64;
    frequencies
        .sorted_by_count()
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
            share: count as f64 * 100.0 / total,
        })
        .collect()
}

fn month_counts(counts: &MonthlyCounts) -> Vec<MonthCount> {
    counts
        .iter()
        .map(|(period, count)| MonthCount {
            month: period.to_string(),
            count,
        })
        .collect()
}

fn value_counts(distribution: &BTreeMap<i64, usize>) -> Vec<ValueCount> {
    distribution
        .iter()
        .map(|(value, count)| ValueCount {
            value: *value,
            count: *count,
        })
        .collect()
}

fn correlation_export(matrix: &CorrelationMatrix) -> CorrelationExport {
    CorrelationExport {
        columns: matrix.columns().to_vec(),
        values: matrix
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(|r| (!r.is_nan()).then_some(r)).collect())
            .collect(),
    }
}

/// Write the exploration aggregates to a JSON file
pub fn export_eda_report(
    report: &EdaReport,
    dataset_file: &str,
    output_path: &Path,
) -> Result<()> {
    let export = EdaExport::from_report(report, dataset_file);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize exploration report to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write exploration report to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
