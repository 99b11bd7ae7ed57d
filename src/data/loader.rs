//! CSV Data Loader Module
//! Reads comma-separated text into column-oriented storage.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Unable to open file {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// One field position across all rows, in source row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    cells: Vec<String>,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, cell: &str) {
        self.cells.push(cell.to_string());
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Column {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

/// Ordered columns of a loaded file. Columns may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from any buffered source.
    ///
    /// Each line is split on `,` with no quoting support. Field `i` is
    /// appended to column `i`, creating the column on first use.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, LoaderError> {
        let mut table = Table::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| LoaderError::Read {
                    line: line_no + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let line = String::from_utf8_lossy(&buf);
            let line = line.strip_suffix('\n').unwrap_or(&line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            table.append_row(line);
        }

        Ok(table)
    }

    /// Convenience for in-memory text.
    pub fn from_str_data(data: &str) -> Self {
        let mut table = Table::default();
        for line in data.lines() {
            table.append_row(line);
        }
        table
    }

    fn append_row(&mut self, line: &str) {
        for (i, field) in split_fields(line).enumerate() {
            if self.columns.len() <= i {
                self.columns.push(Column::new());
            }
            self.columns[i].push(field);
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by 1-based position.
    pub fn column(&self, index: usize) -> Option<&Column> {
        index.checked_sub(1).and_then(|i| self.columns.get(i))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Length of the longest column.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Split a line on every comma. A trailing empty field is not produced,
/// so an empty line yields no fields and `a,b,` yields two.
fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    let body = line.strip_suffix(',').unwrap_or(line);
    let empty = line.is_empty();
    body.split(',').filter(move |_| !empty)
}

/// Loads CSV files and keeps the resulting table for the session.
pub struct DataLoader {
    table: Table,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            table: Table::default(),
            file_path: None,
        }
    }

    /// Load a CSV file. The file is closed before this returns.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&Table, LoaderError> {
        let path = file_path.as_ref();
        self.file_path = Some(path.to_path_buf());

        let table = {
            let file = File::open(path).map_err(|source| LoaderError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "opened csv file");
            Table::from_reader(BufReader::new(file))?
        };

        info!(
            path = %path.display(),
            columns = table.column_count(),
            rows = table.row_count(),
            "loaded csv"
        );
        self.table = table;
        Ok(&self.table)
    }

    pub fn get_row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn get_column_count(&self) -> usize {
        self.table.column_count()
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

/// Load a table, logging any failure and returning an empty table instead.
///
/// Callers treat an empty table as "no data found".
pub fn load_table(path: impl AsRef<Path>) -> Table {
    let mut loader = DataLoader::new();
    match loader.load_csv(path) {
        Ok(_) => loader.into_table(),
        Err(e) => {
            error!("{e}");
            Table::default()
        }
    }
}
