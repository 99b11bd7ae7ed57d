//! Summary Report
//! Non-interactive JSON summary of every column.

use crate::data::{load_table, Table};
use crate::shell::session::{EXIT_NO_DATA, EXIT_OK};
use crate::stats::StatsCalculator;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write a pretty-printed JSON array with one summary per column.
pub fn write_summary<W: Write>(table: &Table, mut out: W) -> Result<()> {
    let summaries = StatsCalculator::summarize_table(table);
    serde_json::to_writer_pretty(&mut out, &summaries).context("Failed to write summary")?;
    writeln!(out)?;
    Ok(())
}

/// Load `path` and write its summary to `out`. Returns the process exit code.
pub fn run_summary<W: Write, E: Write>(path: &Path, out: W, mut err: E) -> Result<u8> {
    let table = load_table(path);
    if table.is_empty() {
        writeln!(err, "No data found in CSV or failed to load the file.")?;
        return Ok(EXIT_NO_DATA);
    }

    write_summary(&table, out)?;
    Ok(EXIT_OK)
}
