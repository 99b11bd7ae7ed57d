//! Command line arguments and the settings derived from them.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "colstat", version, about = "Mean, median and mode of CSV columns")]
pub struct Cli {
    /// CSV file to load. Prompted for when omitted.
    pub file: Option<PathBuf>,

    /// Print a JSON summary of every column and exit.
    #[arg(long, requires = "file")]
    pub summary: bool,

    /// Tracing filter directive, e.g. `debug` or `colstat=trace`.
    #[arg(long, env = "COLSTAT_LOG")]
    pub log_level: Option<String>,
}

/// Run settings
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    pub csv_path: Option<PathBuf>,
    pub summary: bool,
    /// None defers to `RUST_LOG`, then the default filter.
    pub log_filter: Option<String>,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            csv_path: cli.file,
            summary: cli.summary,
            log_filter: cli.log_level,
        }
    }
}
