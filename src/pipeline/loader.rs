//! Dataset loader for delimited text files in a configurable encoding

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use polars::prelude::*;

use crate::pipeline::error::SchemaError;

/// Options controlling how the source file is read
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// WHATWG encoding label, e.g. "latin1" or "utf-8"
    pub encoding: String,
    /// Field separator byte
    pub separator: u8,
    /// Rows used for schema inference. 0 scans the whole file.
    pub infer_schema_length: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: "latin1".to_string(),
            separator: b',',
            infer_schema_length: 10_000,
        }
    }
}

/// The pickup records, loaded once and only ever read afterwards.
///
/// Derivations borrow the dataset and build fresh values, so any number of
/// views can share one instance without observing each other.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    pub fn from_frame(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Estimated in-memory size in megabytes
    pub fn estimated_size_mb(&self) -> f64 {
        self.frame.estimated_size() as f64 / (1024.0 * 1024.0)
    }

    /// Look up a column, turning an absent name into a schema error
    pub fn column(&self, name: &str) -> Result<&Column, SchemaError> {
        self.frame
            .column(name)
            .map_err(|_| SchemaError::MissingColumn {
                column: name.to_string(),
                available: self.column_names(),
            })
    }
}

/// Load a dataset from a delimited text file.
///
/// The raw bytes are decoded with `options.encoding` before parsing, so files
/// exported as latin1 keep their accented labels intact.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;

    let text = decode_text(&bytes, &options.encoding)?;

    let schema_length = if options.infer_schema_length == 0 {
        None
    } else {
        Some(options.infer_schema_length)
    };

    let separator = options.separator;
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .map_parse_options(|opts| opts.with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

    Ok(Dataset::from_frame(frame))
}

/// Decode raw bytes into UTF-8 text using a WHATWG encoding label.
///
/// Invalid sequences are replaced rather than rejected.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| anyhow::anyhow!("Unknown text encoding: '{}'", label))?;

    let (text, _, _) = encoding.decode(bytes);
    Ok(text.into_owned())
}

/// Parse a separator flag value into a single byte
pub fn parse_separator(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("separator must be a single ASCII character, got '{}'", s)),
    }
}
