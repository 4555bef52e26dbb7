//! Hamper Forecast library
//!
//! Derives monthly, categorical and correlation aggregates from food drive
//! pickup records, and turns user selections into hamper demand predictions
//! from a trained sequence model.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
