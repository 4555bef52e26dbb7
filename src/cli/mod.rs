//! CLI module - argument parsing, page selection and interactive views

mod args;
pub mod commands;
pub mod menu;
pub mod predict_form;

pub use args::{Cli, Commands, PredictArgs};
pub use menu::Page;
