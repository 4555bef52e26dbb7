//! Exploration view: every derived aggregate rendered as a terminal table

use std::collections::BTreeMap;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    derive_category_frequencies, derive_integer_distribution, derive_monthly_counts,
    derive_numeric_correlation_matrix, CategoryFrequencies, CorrelationMatrix, Dataset,
    MonthlyCounts, SchemaError, DAY_OF_WEEK_COLUMN, FAMILY_SIZE_COLUMN, PICKUP_DATE_COLUMN,
    SCHEDULED_DATE_COLUMN, SPECIAL_EVENT_COLUMN, STATUS_COLUMN,
};

const BAR_WIDTH: usize = 30;

/// All aggregates shown by the exploration view.
///
/// Each section is derived on its own, so a schema problem in one column only
/// blanks that section.
#[derive(Debug, Clone)]
pub struct EdaReport {
    pub rows: usize,
    pub day_of_week: Result<CategoryFrequencies, SchemaError>,
    pub scheduled_monthly: Result<MonthlyCounts, SchemaError>,
    pub pickup_monthly: Result<MonthlyCounts, SchemaError>,
    pub family_size: Result<BTreeMap<i64, usize>, SchemaError>,
    pub special_event: Result<CategoryFrequencies, SchemaError>,
    pub status: Result<CategoryFrequencies, SchemaError>,
    pub correlation: CorrelationMatrix,
}

impl EdaReport {
    /// Derive every section from the dataset
    pub fn derive(dataset: &Dataset) -> Self {
        Self {
            rows: dataset.height(),
            day_of_week: derive_category_frequencies(dataset, DAY_OF_WEEK_COLUMN),
            scheduled_monthly: derive_monthly_counts(dataset, SCHEDULED_DATE_COLUMN),
            pickup_monthly: derive_monthly_counts(dataset, PICKUP_DATE_COLUMN),
            family_size: derive_integer_distribution(dataset, FAMILY_SIZE_COLUMN),
            special_event: derive_category_frequencies(dataset, SPECIAL_EVENT_COLUMN),
            status: derive_category_frequencies(dataset, STATUS_COLUMN),
            correlation: derive_numeric_correlation_matrix(dataset),
        }
    }

    /// Sections that failed, with their titles
    pub fn failures(&self) -> Vec<(&'static str, &SchemaError)> {
        let sections: [(&'static str, Option<&SchemaError>); 6] = [
            ("Day of Week", self.day_of_week.as_ref().err()),
            ("Scheduled Hampers per Month", self.scheduled_monthly.as_ref().err()),
            ("Actual Hampers per Month", self.pickup_monthly.as_ref().err()),
            ("Family Size", self.family_size.as_ref().err()),
            ("Special Event", self.special_event.as_ref().err()),
            ("Status", self.status.as_ref().err()),
        ];
        sections
            .into_iter()
            .filter_map(|(title, err)| err.map(|e| (title, e)))
            .collect()
    }

    pub fn display(&self) {
        println!(
            "    {} {}",
            style("📊").cyan(),
            style("EXPLORATORY DATA ANALYSIS").white().bold()
        );
        println!(
            "    {}",
            style(
                "Data collected with NorQuest College during the 2025 Food Drive Project; \
                 it does not represent the entire Food Drive."
            )
            .dim()
        );
        println!("    {}", style(format!("{} records", self.rows)).dim());

        print_section(
            "Distribution of Day of Week",
            self.day_of_week
                .as_ref()
                .map(|f| frequency_table("Day of Week", &f.sorted_by_label(), f.total())),
        );
        print_section(
            "Scheduled Number of Food Hampers per Month",
            self.scheduled_monthly
                .as_ref()
                .map(|m| monthly_table("Scheduled Pickups", m)),
        );
        print_section(
            "Actual Number of Food Hampers per Month",
            self.pickup_monthly
                .as_ref()
                .map(|m| monthly_table("Pickups", m)),
        );
        print_section(
            "Distribution of Family Size",
            self.family_size.as_ref().map(distribution_table),
        );
        print_section(
            "Special Event",
            self.special_event
                .as_ref()
                .map(|f| frequency_table("Special Occasion", &f.sorted_by_label(), f.total())),
        );
        print_section(
            "Share of Day of the Week",
            self.day_of_week.as_ref().map(share_table),
        );
        print_section(
            "Correlation Matrix of Numerical Features",
            Ok::<_, &SchemaError>(correlation_table(&self.correlation)),
        );
        print_section(
            "Distribution of Status",
            self.status
                .as_ref()
                .map(|f| frequency_table("Status", &f.sorted_by_count(), f.total())),
        );
        println!();
    }
}

fn print_section(title: &str, table: Result<Table, &SchemaError>) {
    println!();
    println!("    {}", style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    match table {
        Ok(table) => {
            // Indent the table
            for line in table.to_string().lines() {
                println!("    {}", line);
            }
        }
        Err(e) => println!("    {} {}", style("✗").red().bold(), style(e).red()),
    }
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

/// Horizontal bar scaled against the largest count
pub fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(filled)
}

/// Label, count and bar per category
pub fn frequency_table(label_header: &str, entries: &[(&str, usize)], total: usize) -> Table {
    let mut table = new_table(&[label_header, "Count", ""]);
    let max = entries.iter().map(|(_, c)| *c).max().unwrap_or(0);
    for (label, count) in entries {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(bar(*count, max)).fg(Color::Cyan),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(total)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table
}

/// Percentage share per category, the pie chart of the original dashboard
pub fn share_table(frequencies: &CategoryFrequencies) -> Table {
    let mut table = new_table(&["Value", "Share"]);
    for (label, pct) in frequencies.shares() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{:.1}%", pct)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Chronological month, count and bar
pub fn monthly_table(count_header: &str, counts: &MonthlyCounts) -> Table {
    let mut table = new_table(&["Month", count_header, ""]);
    let max = counts.max_count();
    for (period, count) in counts.iter() {
        table.add_row(vec![
            Cell::new(period),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(bar(count, max)).fg(Color::Green),
        ]);
    }
    table
}

/// Integer value, count and bar
pub fn distribution_table(distribution: &BTreeMap<i64, usize>) -> Table {
    let mut table = new_table(&["Value", "Count", ""]);
    let max = distribution.values().copied().max().unwrap_or(0);
    for (value, count) in distribution {
        table.add_row(vec![
            Cell::new(value).set_alignment(CellAlignment::Right),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(bar(*count, max)).fg(Color::Magenta),
        ]);
    }
    table
}

/// Coefficient grid, colored by sign and strength
pub fn correlation_table(matrix: &CorrelationMatrix) -> Table {
    let mut headers: Vec<&str> = vec![""];
    headers.extend(matrix.columns().iter().map(|c| c.as_str()));
    let mut table = new_table(&headers);

    for (i, name) in matrix.columns().iter().enumerate() {
        let mut row = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        for j in 0..matrix.dim() {
            let r = matrix.at(i, j);
            let cell = if r.is_nan() {
                Cell::new("n/a").fg(Color::DarkGrey)
            } else {
                Cell::new(format!("{:.2}", r)).fg(correlation_color(r))
            };
            row.push(cell.set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }
    table
}

fn correlation_color(r: f64) -> Color {
    match r {
        r if r >= 0.7 => Color::Red,
        r if r >= 0.3 => Color::Yellow,
        r if r <= -0.7 => Color::Blue,
        r if r <= -0.3 => Color::Cyan,
        _ => Color::White,
    }
}
