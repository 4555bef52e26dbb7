//! Value frequency tables for categorical and integer columns

use std::collections::{BTreeMap, HashMap};

use polars::prelude::*;

use crate::pipeline::error::SchemaError;
use crate::pipeline::loader::Dataset;

pub const DAY_OF_WEEK_COLUMN: &str = "Day_of_week";
pub const SPECIAL_EVENT_COLUMN: &str = "Special_Event";
pub const STATUS_COLUMN: &str = "Status";
pub const FAMILY_SIZE_COLUMN: &str = "Family_size";

/// Occurrence counts of each distinct non-null value in a categorical column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFrequencies {
    column: String,
    counts: HashMap<String, usize>,
}

impl CategoryFrequencies {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.counts.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Most frequent first, ties broken by label
    pub fn sorted_by_count(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Alphabetical by label
    pub fn sorted_by_label(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Percentage share of each value, most frequent first
    pub fn shares(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.sorted_by_count()
            .into_iter()
            .map(|(label, count)| (label, count as f64 * 100.0 / total as f64))
            .collect()
    }
}

/// Count the distinct values of a text or categorical column.
///
/// Nulls are not counted.
pub fn derive_category_frequencies(
    dataset: &Dataset,
    column_name: &str,
) -> Result<CategoryFrequencies, SchemaError> {
    let column = dataset.column(column_name)?;

    match column.dtype() {
        DataType::String | DataType::Categorical(_, _) | DataType::Null => {}
        other => {
            return Err(SchemaError::WrongType {
                column: column_name.to_string(),
                expected: "text or categorical",
                found: other.to_string(),
            })
        }
    }

    let read_error = |e: PolarsError| SchemaError::Read {
        column: column_name.to_string(),
        message: e.to_string(),
    };
    let as_text = column.cast(&DataType::String).map_err(read_error)?;
    let values = as_text.as_materialized_series().str().map_err(read_error)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }

    Ok(CategoryFrequencies {
        column: column_name.to_string(),
        counts,
    })
}

/// Count the distinct values of an integer column, ascending by value.
///
/// Used for the family-size distribution.
pub fn derive_integer_distribution(
    dataset: &Dataset,
    column_name: &str,
) -> Result<BTreeMap<i64, usize>, SchemaError> {
    let column = dataset.column(column_name)?;

    if !column.dtype().is_integer() {
        return Err(SchemaError::WrongType {
            column: column_name.to_string(),
            expected: "integer",
            found: column.dtype().to_string(),
        });
    }

    let read_error = |e: PolarsError| SchemaError::Read {
        column: column_name.to_string(),
        message: e.to_string(),
    };
    let as_i64 = column.cast(&DataType::Int64).map_err(read_error)?;
    let values = as_i64.as_materialized_series().i64().map_err(read_error)?;

    let mut distribution: BTreeMap<i64, usize> = BTreeMap::new();
    for value in values.iter().flatten() {
        *distribution.entry(value).or_insert(0) += 1;
    }

    Ok(distribution)
}
