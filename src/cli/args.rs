//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{
    parse_separator, LoadOptions, Selections, DEFAULT_DAY, DEFAULT_FAMILY_SIZE, DEFAULT_MONTH,
    DEFAULT_YEAR,
};

/// Hamper Forecast - explore food hamper pickups and predict demand
#[derive(Parser, Debug)]
#[command(name = "hamper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// View to open. Without a subcommand an interactive session starts.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Pickup records file (delimited text with a header row)
    #[arg(short, long, global = true, default_value = "Islamic_Food_Drive_cleaned_data.csv")]
    pub data: PathBuf,

    /// Trained model artifact (JSON)
    #[arg(short, long, global = true, default_value = "lstm_model.json")]
    pub model: PathBuf,

    /// Text encoding of the data file (WHATWG label, e.g. latin1, utf-8)
    #[arg(long, global = true, default_value = "latin1")]
    pub encoding: String,

    /// Field separator of the data file. Use "tab" for tab-separated files.
    #[arg(long, global = true, default_value = ",", value_parser = parse_separator)]
    pub separator: u8,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, global = true, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Reuse a loaded model across predictions until the artifact changes on disk.
    /// By default the artifact is re-read for every prediction.
    #[arg(long, global = true, default_value = "false")]
    pub cache_model: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the project description
    Overview,

    /// Show the exploratory analysis of the pickup records
    Explore {
        /// Also write every aggregate to this JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Predict the number of food hampers for one set of inputs
    Predict(PredictArgs),
}

/// Model inputs for a single prediction
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Special event label, e.g. "Ramadan"
    #[arg(long, default_value = "New Year's Day")]
    pub special_event: String,

    /// Day of the week, e.g. "Friday"
    #[arg(long, default_value = "Monday")]
    pub day_of_week: String,

    /// Client status: Active, Closed or Pending
    #[arg(long, default_value = "Active")]
    pub status: String,

    /// Family size (1-13)
    #[arg(
        long,
        default_value_t = DEFAULT_FAMILY_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=13)
    )]
    pub family_size: u32,

    /// Day of the month (1-31)
    #[arg(
        long,
        default_value_t = DEFAULT_DAY,
        value_parser = clap::value_parser!(u32).range(1..=31)
    )]
    pub day: u32,

    /// Month (1-12)
    #[arg(
        long,
        default_value_t = DEFAULT_MONTH,
        value_parser = clap::value_parser!(u32).range(1..=12)
    )]
    pub month: u32,

    /// Year (2023-2025)
    #[arg(
        long,
        default_value_t = DEFAULT_YEAR,
        value_parser = clap::value_parser!(i32).range(2023..=2025)
    )]
    pub year: i32,
}

impl PredictArgs {
    pub fn selections(&self) -> Selections {
        Selections {
            special_event: self.special_event.clone(),
            day_of_week: self.day_of_week.clone(),
            status: self.status.clone(),
            family_size: self.family_size,
            day: self.day,
            month: self.month,
            year: self.year,
        }
    }
}

impl Cli {
    /// Dataset loading options from the global flags
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            encoding: self.encoding.clone(),
            separator: self.separator,
            infer_schema_length: self.infer_schema_length,
        }
    }
}
