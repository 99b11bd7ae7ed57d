//! colstat - CSV Column Statistics
//!
//! Loads a comma-separated file into column-oriented storage and computes
//! the mean, median and mode of its columns.

pub mod cli;
pub mod data;
pub mod shell;
pub mod stats;

pub use data::{load_table, Column, Table};
pub use stats::{StatError, StatisticKind, StatsCalculator};
