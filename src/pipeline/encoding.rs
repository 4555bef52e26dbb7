//! Category lookup tables and feature vector assembly.
//!
//! The codes must match the integer encoding the model was trained with, so
//! the tables are fixed here rather than derived from the dataset: a label
//! offered to the user but absent from the data still encodes, and a label
//! present in the data but missing from a table does not.

use std::ops::RangeInclusive;

use crate::pipeline::error::UnknownCategoryError;

/// Number of values in a feature vector
pub const FEATURE_COUNT: usize = 7;

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Special_Event",
    "Day_of_week",
    "Status",
    "Family_size",
    "Day",
    "Month",
    "Year",
];

pub const FAMILY_SIZE_RANGE: RangeInclusive<u32> = 1..=13;
pub const DAY_RANGE: RangeInclusive<u32> = 1..=31;
pub const MONTH_RANGE: RangeInclusive<u32> = 1..=12;
pub const YEAR_RANGE: RangeInclusive<i32> = 2023..=2025;

pub const DEFAULT_FAMILY_SIZE: u32 = 7;
pub const DEFAULT_DAY: u32 = 15;
pub const DEFAULT_MONTH: u32 = 6;
pub const DEFAULT_YEAR: i32 = 2024;

/// A fixed label to code mapping for one categorical feature
#[derive(Debug)]
pub struct CategoryTable {
    name: &'static str,
    entries: &'static [(&'static str, i64)],
}

impl CategoryTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, i64)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Labels in declaration order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label at a declaration-order position
    pub fn label_at(&self, index: usize) -> Option<&'static str> {
        self.entries.get(index).map(|(label, _)| *label)
    }

    pub fn encode(&self, label: &str) -> Result<i64, UnknownCategoryError> {
        encode_categorical(self, label)
    }
}

pub static SPECIAL_EVENT_TABLE: CategoryTable = CategoryTable::new(
    "Special_Event",
    &[
        ("New Year's Day", 1),
        ("Family Day", 2),
        ("Ramadan", 3),
        ("Eid al-Fitr", 4),
        ("Laylat al-Qadr", 5),
        ("Eid al-Adha", 6),
        ("Islamic New Year", 7),
        ("Hajj", 8),
        ("Mawlid al-Nabi", 9),
        ("Halloween", 10),
        ("Remembrance Day", 11),
        ("Christmas Day", 12),
    ],
);

pub static DAY_OF_WEEK_TABLE: CategoryTable = CategoryTable::new(
    "Day_of_week",
    &[
        ("Monday", 0),
        ("Tuesday", 1),
        ("Wednesday", 2),
        ("Thursday", 3),
        ("Friday", 4),
        ("Saturday", 5),
        ("Sunday", 6),
    ],
);

pub static STATUS_TABLE: CategoryTable =
    CategoryTable::new("Status", &[("Active", 1), ("Closed", 0), ("Pending", 2)]);

/// Map a label to its code. Matching is exact.
pub fn encode_categorical(
    table: &CategoryTable,
    label: &str,
) -> Result<i64, UnknownCategoryError> {
    table
        .entries
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, code)| *code)
        .ok_or_else(|| UnknownCategoryError {
            table: table.name,
            label: label.to_string(),
        })
}

/// One prediction request as chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    pub special_event: String,
    pub day_of_week: String,
    pub status: String,
    pub family_size: u32,
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            special_event: SPECIAL_EVENT_TABLE.label_at(0).unwrap_or_default().to_string(),
            day_of_week: DAY_OF_WEEK_TABLE.label_at(0).unwrap_or_default().to_string(),
            status: STATUS_TABLE.label_at(0).unwrap_or_default().to_string(),
            family_size: DEFAULT_FAMILY_SIZE,
            day: DEFAULT_DAY,
            month: DEFAULT_MONTH,
            year: DEFAULT_YEAR,
        }
    }
}

/// The model input for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector([i64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn values(&self) -> &[i64; FEATURE_COUNT] {
        &self.0
    }

    pub fn to_f64(&self) -> [f64; FEATURE_COUNT] {
        self.0.map(|v| v as f64)
    }
}

/// Encode the selections into `[special_event, day_of_week, status,
/// family_size, day, month, year]`.
///
/// Numeric ranges are not checked here; the argument parser and the form
/// enforce them. Callers outside those paths must validate first.
pub fn build_feature_vector(
    selections: &Selections,
) -> Result<FeatureVector, UnknownCategoryError> {
    let special_event = encode_categorical(&SPECIAL_EVENT_TABLE, &selections.special_event)?;
    let day_of_week = encode_categorical(&DAY_OF_WEEK_TABLE, &selections.day_of_week)?;
    let status = encode_categorical(&STATUS_TABLE, &selections.status)?;

    Ok(FeatureVector([
        special_event,
        day_of_week,
        status,
        i64::from(selections.family_size),
        i64::from(selections.day),
        i64::from(selections.month),
        i64::from(selections.year),
    ]))
}
