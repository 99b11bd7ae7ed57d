//! Data Processor Module
//! Coerces raw text cells into numeric series.

use crate::data::Column;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Base-10 float literal: sign, digits with optional fraction, optional exponent.
static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal literal pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Non-numeric data encountered: {0}")]
    NotNumeric(String),
}

/// A cell skipped during coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedCell {
    /// 0-based position within the column.
    pub row: usize,
    pub error: ParseError,
}

impl RejectedCell {
    pub fn text(&self) -> &str {
        match &self.error {
            ParseError::NotNumeric(text) => text,
        }
    }
}

/// Numeric values of a column plus the cells that did not parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coercion {
    pub values: Vec<f64>,
    pub rejected: Vec<RejectedCell>,
}

impl Coercion {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse one cell. Surrounding whitespace is ignored.
pub fn parse_numeric(cell: &str) -> Result<f64, ParseError> {
    let text = cell.trim();
    if !DECIMAL_LITERAL.is_match(text) {
        return Err(ParseError::NotNumeric(cell.to_string()));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| ParseError::NotNumeric(cell.to_string()))?;

    // out of range: overflow to infinity, or a non-zero mantissa flushed to zero
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);
    let underflow = value == 0.0 && mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'));
    if !value.is_finite() || underflow {
        return Err(ParseError::NotNumeric(cell.to_string()));
    }
    Ok(value)
}

/// Handles numeric coercion of raw columns.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse every cell in order, skipping and recording the ones that fail.
    pub fn coerce(column: &Column) -> Coercion {
        let mut out = Coercion::default();

        for (row, cell) in column.cells().iter().enumerate() {
            match parse_numeric(cell) {
                Ok(v) => out.values.push(v),
                Err(error) => {
                    debug!(row, cell = %cell, "skipping non-numeric cell");
                    out.rejected.push(RejectedCell { row, error });
                }
            }
        }

        out
    }
}
