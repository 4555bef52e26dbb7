//! Report module - terminal views and exports

pub mod eda;
pub mod export;
pub mod overview;

pub use eda::*;
pub use export::*;
pub use overview::*;
