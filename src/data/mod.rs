//! Data module - CSV loading and numeric coercion

mod loader;
mod processor;

pub use loader::{load_table, Column, DataLoader, LoaderError, Table};
pub use processor::{parse_numeric, Coercion, DataProcessor, ParseError, RejectedCell};
