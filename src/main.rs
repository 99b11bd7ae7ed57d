//! colstat - CSV Column Statistics Shell
//!
//! Loads a comma-separated file into columns and computes the mean, median
//! and mode of a chosen column from an interactive menu.

use anyhow::Result;
use clap::Parser;
use colstat::cli::{Cli, Settings, DEFAULT_LOG_FILTER};
use colstat::shell::{self, Session};
use std::io;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<ExitCode> {
    let settings = Settings::from(Cli::parse());
    init_logging(settings.log_filter.as_deref());
    info!(?settings, "startup");

    let code = match settings.csv_path {
        Some(path) if settings.summary => {
            shell::run_summary(&path, io::stdout().lock(), io::stderr())?
        }
        csv_path => {
            let stdin = io::stdin();
            Session::new(stdin.lock(), io::stdout(), io::stderr()).run(csv_path)?
        }
    };

    Ok(ExitCode::from(code))
}

/// Logs go to stderr so stdout only carries results.
fn init_logging(filter: Option<&str>) {
    let env = match filter {
        Some(directive) => EnvFilter::try_new(directive).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
}
