//! Statistics Calculator Module
//! Mean, median and mode over numeric columns, plus per-column summaries.

use crate::data::{Column, DataProcessor, RejectedCell, Table};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    #[error("Invalid column number")]
    InvalidColumn { index: usize, column_count: usize },
    #[error("Column contains no numeric data")]
    NoNumericData {
        index: usize,
        rejected: Vec<RejectedCell>,
    },
}

impl StatError {
    /// Cells skipped before the request failed.
    pub fn rejected(&self) -> &[RejectedCell] {
        match self {
            StatError::NoNumericData { rejected, .. } => rejected,
            StatError::InvalidColumn { .. } => &[],
        }
    }
}

/// Which reducer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatisticKind {
    Mean,
    Median,
    Mode,
}

impl StatisticKind {
    pub fn label(self) -> &'static str {
        match self {
            StatisticKind::Mean => "Mean",
            StatisticKind::Median => "Median",
            StatisticKind::Mode => "Mode",
        }
    }

    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            StatisticKind::Mean => StatsCalculator::mean(values),
            StatisticKind::Median => StatsCalculator::median(values),
            StatisticKind::Mode => StatsCalculator::mode(values),
        }
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one statistics request.
#[derive(Debug, Clone, PartialEq)]
pub struct StatOutcome {
    pub kind: StatisticKind,
    pub value: f64,
    /// Cells skipped while building the numeric series.
    pub rejected: Vec<RejectedCell>,
}

/// Descriptive statistics for a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: usize,
    pub cells: usize,
    pub numeric: usize,
    pub rejected: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub std_dev: Option<f64>,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean. Empty input yields 0.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Median of a sorted copy. Empty input yields 0.
    pub fn median(values: &[f64]) -> f64 {
        let n = values.len();
        if n == 0 {
            return 0.0;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    /// Most frequent value by exact equality. Ties go to the smallest value.
    /// Empty input yields 0.
    pub fn mode(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut mode = sorted[0];
        let mut max_count = 0;
        let mut i = 0;
        while i < sorted.len() {
            let value = sorted[i];
            let run = sorted[i..].iter().take_while(|&&v| v == value).count();
            // strictly greater keeps the smallest value on ties
            if run > max_count {
                max_count = run;
                mode = value;
            }
            i += run;
        }

        mode
    }

    /// Validate a 1-based column index against the table.
    pub fn select_column(table: &Table, index: usize) -> Result<&Column, StatError> {
        table.column(index).ok_or(StatError::InvalidColumn {
            index,
            column_count: table.column_count(),
        })
    }

    /// Coerce the chosen column and run one reducer over it.
    pub fn compute_statistic(
        table: &Table,
        index: usize,
        kind: StatisticKind,
    ) -> Result<StatOutcome, StatError> {
        let column = Self::select_column(table, index)?;
        let coerced = DataProcessor::coerce(column);
        if coerced.is_empty() {
            return Err(StatError::NoNumericData {
                index,
                rejected: coerced.rejected,
            });
        }

        Ok(StatOutcome {
            kind,
            value: kind.apply(&coerced.values),
            rejected: coerced.rejected,
        })
    }

    /// Summarise one column. Statistics are absent when it has no numeric cells.
    pub fn summarize(column: &Column, index: usize) -> ColumnSummary {
        let coerced = DataProcessor::coerce(column);
        let values = &coerced.values;
        let has_data = !values.is_empty();
        let when = |v: f64| has_data.then_some(v);

        ColumnSummary {
            column: index,
            cells: column.len(),
            numeric: values.len(),
            rejected: coerced.rejected.len(),
            mean: when(Self::mean(values)),
            median: when(Self::median(values)),
            mode: when(Self::mode(values)),
            min: when(Statistics::min(values.iter())),
            max: when(Statistics::max(values.iter())),
            std_dev: (values.len() > 1).then(|| values.iter().std_dev()),
        }
    }

    /// Summaries for every column, 1-based.
    pub fn summarize_table(table: &Table) -> Vec<ColumnSummary> {
        table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| Self::summarize(column, i + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(StatsCalculator::mean(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(StatsCalculator::mean(&[-1.5]), -1.5);
        assert_eq!(StatsCalculator::mean(&[]), 0.0);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(StatsCalculator::median(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
        assert_eq!(StatsCalculator::median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(StatsCalculator::median(&[5.0, 1.0, 4.0, 2.0, 3.0]), 3.0);
        assert_eq!(StatsCalculator::median(&[]), 0.0);
    }

    #[test]
    fn test_median_does_not_reorder_input() {
        let values = vec![3.0, 1.0, 2.0];
        StatsCalculator::median(&values);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_mode_ties_resolve_to_smallest() {
        assert_eq!(StatsCalculator::mode(&[1.0, 1.0, 2.0, 2.0, 3.0]), 1.0);
        assert_eq!(StatsCalculator::mode(&[3.0, 2.0, 2.0, 1.0, 1.0]), 1.0);
        assert_eq!(StatsCalculator::mode(&[9.0, 7.0, 8.0]), 7.0);
        assert_eq!(StatsCalculator::mode(&[]), 0.0);
    }

    #[test]
    fn test_mode_picks_highest_frequency() {
        assert_eq!(StatsCalculator::mode(&[5.0, 1.0, 5.0, 2.0, 5.0, 1.0]), 5.0);
        assert_eq!(StatsCalculator::mode(&[-2.0, 0.1, 0.1]), 0.1);
    }

    #[test]
    fn test_reducers_ignore_permutation() {
        let a = [4.0, 1.0, 3.0, 1.0, 4.0, 2.0];
        let b = [1.0, 4.0, 2.0, 4.0, 3.0, 1.0];
        for kind in [StatisticKind::Mean, StatisticKind::Median, StatisticKind::Mode] {
            assert_eq!(kind.apply(&a), kind.apply(&b), "{kind}");
        }
        assert_eq!(StatisticKind::Mode.apply(&a), 1.0);
    }

    #[test]
    fn test_compute_statistic_skips_text_cells() {
        let table = Table::from_str_data("1,2\n3,4\n5,x\n");

        let mean1 = StatsCalculator::compute_statistic(&table, 1, StatisticKind::Mean).unwrap();
        assert_eq!(mean1.value, 3.0);
        assert!(mean1.rejected.is_empty());

        let mean2 = StatsCalculator::compute_statistic(&table, 2, StatisticKind::Mean).unwrap();
        assert_eq!(mean2.value, 3.0);
        assert_eq!(mean2.rejected.len(), 1);
        assert_eq!(mean2.rejected[0].text(), "x");
    }

    #[test]
    fn test_out_of_range_cell_does_not_poison_mean() {
        let table = Table::from_str_data("1\n1e400\n3\n");
        let mean = StatsCalculator::compute_statistic(&table, 1, StatisticKind::Mean).unwrap();
        assert_eq!(mean.value, 2.0);
        assert_eq!(mean.rejected.len(), 1);
        assert_eq!(mean.rejected[0].text(), "1e400");
    }

    #[test]
    fn test_compute_statistic_rejects_bad_index() {
        let table = Table::from_str_data("1,2\n");
        for index in [0, 3] {
            assert_eq!(
                StatsCalculator::compute_statistic(&table, index, StatisticKind::Median),
                Err(StatError::InvalidColumn {
                    index,
                    column_count: 2
                })
            );
        }
    }

    #[test]
    fn test_compute_statistic_without_numbers() {
        let table = Table::from_str_data("a\nb\nc\n");
        for kind in [StatisticKind::Mean, StatisticKind::Median, StatisticKind::Mode] {
            let err = StatsCalculator::compute_statistic(&table, 1, kind).unwrap_err();
            assert!(matches!(err, StatError::NoNumericData { index: 1, .. }));
            let texts: Vec<&str> = err.rejected().iter().map(|r| r.text()).collect();
            assert_eq!(texts, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_summarize_table() {
        let table = Table::from_str_data("1,a\n2,b\n2,c\n4\n");
        let summaries = StatsCalculator::summarize_table(&table);
        assert_eq!(summaries.len(), 2);

        let first = &summaries[0];
        assert_eq!(first.column, 1);
        assert_eq!(first.cells, 4);
        assert_eq!(first.numeric, 4);
        assert_eq!(first.mean, Some(2.25));
        assert_eq!(first.median, Some(2.0));
        assert_eq!(first.mode, Some(2.0));
        assert_eq!(first.min, Some(1.0));
        assert_eq!(first.max, Some(4.0));
        let sd = first.std_dev.unwrap();
        assert!((sd - 1.258_305_739_211_791_6).abs() < 1e-12);

        let second = &summaries[1];
        assert_eq!(second.cells, 3);
        assert_eq!(second.rejected, 3);
        assert_eq!(second.mean, None);
        assert_eq!(second.std_dev, None);
    }

    #[test]
    fn test_summary_serializes_missing_values_as_null() {
        let column: Column = ["only"].into_iter().collect();
        let json = serde_json::to_value(StatsCalculator::summarize(&column, 1)).unwrap();
        assert_eq!(json["column"], 1);
        assert!(json["mean"].is_null());
        assert!(json["std_dev"].is_null());
    }
}
