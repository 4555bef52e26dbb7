//! Monthly aggregation of pickup dates

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::pipeline::error::SchemaError;
use crate::pipeline::loader::Dataset;

/// Date column holding the scheduled collection date
pub const SCHEDULED_DATE_COLUMN: &str = "collect_scheduled_date";

/// Date column holding the actual pickup date
pub const PICKUP_DATE_COLUMN: &str = "Pickup_date";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-times carrying a UTC offset; the local calendar date is kept
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Record counts per calendar month for one date column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyCounts {
    column: String,
    counts: BTreeMap<YearMonth, usize>,
}

impl MonthlyCounts {
    /// Name of the date column these counts were derived from
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Periods and counts in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (YearMonth, usize)> + '_ {
        self.counts.iter().map(|(period, count)| (*period, *count))
    }

    pub fn get(&self, period: YearMonth) -> Option<usize> {
        self.counts.get(&period).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of records that carried a parseable date
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

/// Count records per calendar month of `date_column`.
///
/// Values that do not parse as a date are left out of the counts. The counts
/// are rebuilt from the dataset on every call.
pub fn derive_monthly_counts(
    dataset: &Dataset,
    date_column: &str,
) -> Result<MonthlyCounts, SchemaError> {
    let column = dataset.column(date_column)?;
    let read_error = |e: PolarsError| SchemaError::Read {
        column: date_column.to_string(),
        message: e.to_string(),
    };

    let as_text = match column.dtype() {
        DataType::String | DataType::Null => column.cast(&DataType::String).map_err(read_error)?,
        DataType::Date | DataType::Datetime(_, _) => column
            .cast(&DataType::Date)
            .and_then(|c| c.cast(&DataType::String))
            .map_err(read_error)?,
        other => {
            return Err(SchemaError::WrongType {
                column: date_column.to_string(),
                expected: "date or text",
                found: other.to_string(),
            })
        }
    };

    let values = as_text.as_materialized_series().str().map_err(read_error)?;

    let mut counts: BTreeMap<YearMonth, usize> = BTreeMap::new();
    for date in values.iter().flatten().filter_map(parse_calendar_date) {
        *counts.entry(YearMonth::of(date)).or_insert(0) += 1;
    }

    Ok(MonthlyCounts {
        column: date_column.to_string(),
        counts,
    })
}

/// Parse a date or date-time string, keeping only the calendar date.
///
/// Zoned values (`Z`, `+hh:mm`, `+hhmm`) keep the date as written, without
/// converting to UTC.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .or_else(|| {
                    ZONED_FORMATS
                        .iter()
                        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
                })
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_calendar_date("2024-03-05"), expected);
        assert_eq!(parse_calendar_date(" 2024-03-05 "), expected);
        assert_eq!(parse_calendar_date("2024/03/05"), expected);
        assert_eq!(parse_calendar_date("03/05/2024"), expected);
        assert_eq!(parse_calendar_date("2024-03-05 14:30:00"), expected);
        assert_eq!(parse_calendar_date("2024-03-05T14:30:00.250"), expected);
        assert_eq!(parse_calendar_date("03/05/2024 09:15"), expected);
        assert_eq!(parse_calendar_date("2024/03/05 14:30:00"), expected);
        assert_eq!(parse_calendar_date("2024/03/05 14:30"), expected);
        assert_eq!(parse_calendar_date("2024-03-05T14:30"), expected);
    }

    #[test]
    fn test_parse_calendar_date_with_offsets() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_calendar_date("2024-03-05T14:30:00Z"), expected);
        assert_eq!(parse_calendar_date("2024-03-05T14:30:00.5+02:00"), expected);
        assert_eq!(parse_calendar_date("2024-03-05 14:30:00+00:00"), expected);
        assert_eq!(parse_calendar_date("2024-03-05 14:30:00-0700"), expected);
        // The written date wins over the UTC date
        assert_eq!(parse_calendar_date("2024-03-05T23:30:00-05:00"), expected);
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("not a date"), None);
        assert_eq!(parse_calendar_date("2024-13-01"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
    }

    #[test]
    fn test_year_month_display_and_order() {
        assert_eq!(YearMonth::new(2024, 3).to_string(), "2024-03");
        assert!(YearMonth::new(2023, 12) < YearMonth::new(2024, 1));
        assert!(YearMonth::new(2024, 2) < YearMonth::new(2024, 11));
    }
}
