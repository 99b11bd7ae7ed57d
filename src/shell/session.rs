//! Interactive Session
//! Prompt loop driving the loader and the statistics over injected I/O.

use crate::data::{DataLoader, RejectedCell, Table};
use crate::shell::menu::{MenuChoice, MENU_TEXT};
use crate::stats::{StatisticKind, StatsCalculator};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

pub const EXIT_OK: u8 = 0;
pub const EXIT_NO_DATA: u8 = 1;

enum Flow {
    Continue,
    Quit,
}

/// One interactive run over a single file.
///
/// Results go to `out`, diagnostics to `err`.
pub struct Session<R, W, E> {
    input: R,
    out: W,
    err: E,
    table: Table,
}

impl<R: BufRead, W: Write, E: Write> Session<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self {
            input,
            out,
            err,
            table: Table::default(),
        }
    }

    /// Load the file (prompting when no path is given), then serve the menu
    /// until exit or end of input. Returns the process exit code.
    pub fn run(&mut self, csv_path: Option<PathBuf>) -> io::Result<u8> {
        let path = match csv_path {
            Some(path) => path,
            None => {
                write!(self.out, "Enter the path to the CSV file: ")?;
                self.out.flush()?;
                PathBuf::from(self.read_line()?.unwrap_or_default())
            }
        };

        if !self.load(path)? {
            writeln!(self.out, "No data found in CSV or failed to load the file.")?;
            return Ok(EXIT_NO_DATA);
        }

        loop {
            write!(self.out, "{MENU_TEXT}")?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                info!("input closed, ending session");
                return Ok(EXIT_OK);
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::DisplayColumns) => self.display_columns()?,
                Ok(MenuChoice::Statistic(kind)) => {
                    if let Flow::Quit = self.perform(kind)? {
                        return Ok(EXIT_OK);
                    }
                }
                Ok(MenuChoice::Exit) => {
                    writeln!(self.out, "Exiting...")?;
                    return Ok(EXIT_OK);
                }
                Err(e) => writeln!(self.err, "{e}")?,
            }
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns false when the table ended up empty.
    fn load(&mut self, path: PathBuf) -> io::Result<bool> {
        let mut loader = DataLoader::new();
        match loader.load_csv(&path).map(|_| ()) {
            Ok(()) if loader.get_column_count() > 0 => self.write_status(&loader)?,
            Ok(()) => {}
            Err(e) => {
                debug!("{e}");
                writeln!(self.err, "{e}")?;
            }
        }
        self.table = loader.into_table();
        Ok(!self.table.is_empty())
    }

    fn write_status(&mut self, loader: &DataLoader) -> io::Result<()> {
        let path = loader
            .get_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        writeln!(
            self.out,
            "Loaded {path}: {} columns, {} rows",
            loader.get_column_count(),
            loader.get_row_count()
        )
    }

    fn display_columns(&mut self) -> io::Result<()> {
        writeln!(self.out, "CSV File Content:")?;
        for (i, column) in self.table.columns().iter().enumerate() {
            writeln!(self.out, "Column {}:", i + 1)?;
            for cell in column.cells() {
                write!(self.out, "{cell} -> ")?;
            }
            writeln!(self.out, "NULL")?;
        }
        Ok(())
    }

    fn perform(&mut self, kind: StatisticKind) -> io::Result<Flow> {
        write!(self.out, "Enter column number: ")?;
        self.out.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(Flow::Quit);
        };
        // 0 is never a valid column, so unparsable input falls through to InvalidColumn
        let index = line.trim().parse::<usize>().unwrap_or(0);

        match StatsCalculator::compute_statistic(&self.table, index, kind) {
            Ok(outcome) => {
                self.report_rejected(&outcome.rejected)?;
                writeln!(self.out, "{}: {}", outcome.kind, outcome.value)?;
            }
            Err(e) => {
                self.report_rejected(e.rejected())?;
                writeln!(self.err, "{e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn report_rejected(&mut self, rejected: &[RejectedCell]) -> io::Result<()> {
        for cell in rejected {
            writeln!(self.err, "{}", cell.error)?;
        }
        Ok(())
    }

    /// Next input line without its terminator, or None at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
