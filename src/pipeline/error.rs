//! Error types for the derivation and prediction pipelines.
//!
//! Each error is scoped to the single derivation or prediction request that
//! raised it. None of them should take the whole process down.

use std::path::PathBuf;

use thiserror::Error;

/// The dataset does not match the columns a derivation expects.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    /// The requested column is absent from the dataset.
    #[error("column '{column}' not found in dataset. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// The column exists but its type cannot feed the derivation.
    #[error("column '{column}' has type {found}, expected {expected}")]
    WrongType {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// Lower-level dataframe failure while reading a column.
    #[error("failed to read column '{column}': {message}")]
    Read { column: String, message: String },
}

/// A selected label is not a key of its lookup table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {table} label '{label}'")]
pub struct UnknownCategoryError {
    /// Name of the lookup table (the feature name)
    pub table: &'static str,
    /// The offending label, verbatim
    pub label: String,
}

/// Failures while loading a model artifact or running inference.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {} is not a valid model document", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Layer weights disagree with each other or with the declared input shape.
    #[error("invalid model artifact: layer {layer} ({kind}): {message}")]
    InvalidLayer {
        layer: usize,
        kind: &'static str,
        message: String,
    },

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    /// The batch handed to the model does not have the width the artifact expects.
    #[error(
        "input shape mismatch: model expects {expected} features per row \
         (input_shape {timesteps}x{features}), got {found}"
    )]
    InputShape {
        expected: usize,
        timesteps: usize,
        features: usize,
        found: usize,
    },

    /// The network did not produce a single scalar per row.
    #[error("output shape mismatch: expected (N, 1), model produced ({rows}, {cols})")]
    OutputShape { rows: usize, cols: usize },

    #[error("model produced a non-finite output ({0})")]
    NonFiniteOutput(f64),
}

/// Any failure of a single prediction request.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
