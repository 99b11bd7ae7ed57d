//! Stats module - Statistical reducers

mod calculator;

pub use calculator::{ColumnSummary, StatError, StatOutcome, StatisticKind, StatsCalculator};
