//! Workbook access: source identity, file fingerprints and raw sheet reads.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use calamine::{open_workbook_auto, Data, Reader};

use crate::config;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// SourceSpec / SourceKey
// ---------------------------------------------------------------------------

/// Where a price table comes from and how its sheet is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub sheet: String,
    /// Title rows above the header row.
    pub skip_rows: usize,
}

impl SourceSpec {
    /// A spec for `path` with the default sheet name and title-row count.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: config::DEFAULT_SHEET.to_string(),
            skip_rows: config::DEFAULT_SKIP_ROWS,
        }
    }

    pub fn sheet(mut self, sheet: &str) -> Self {
        self.sheet = sheet.to_string();
        self
    }

    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    /// Identity of this source in the cache.
    ///
    /// The path is canonicalized when the file exists so that different
    /// spellings of the same file share one entry. The title-row count is
    /// part of the key since it changes what the sheet loads to.
    pub fn key(&self) -> SourceKey {
        let path = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        SourceKey {
            path,
            sheet: self.sheet.clone(),
            skip_rows: self.skip_rows,
        }
    }
}

/// Cache key: one worksheet of one file, read with one layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub path: PathBuf,
    pub sheet: String,
    pub skip_rows: usize,
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Size and modification time of a source file, used to spot edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl Fingerprint {
    pub fn of(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DashboardError::NotFound(format!(
                "Workbook {} does not exist",
                path.display()
            )),
            _ => DashboardError::Io(e),
        })?;
        Ok(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// RawTable
// ---------------------------------------------------------------------------

/// A cell as read from the sheet, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<&Data> for Cell {
    fn from(d: &Data) -> Self {
        match d {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            _ => Cell::Empty,
        }
    }
}

/// All rows of one worksheet, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }
}

/// Read every row of `sheet` from the workbook at `path`.
///
/// Any format calamine understands works (xlsx, xlsm, xlsb, xls, ods).
pub fn read_sheet(path: &Path, sheet: &str) -> Result<RawTable> {
    if !path.exists() {
        return Err(DashboardError::NotFound(format!(
            "Workbook {} does not exist",
            path.display()
        )));
    }

    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet) {
        return Err(DashboardError::NotFound(format!(
            "Sheet '{}' not found in {} (available: {})",
            sheet,
            path.display(),
            names.join(", ")
        )));
    }

    let range = workbook.worksheet_range(sheet)?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();

    tracing::debug!(path = %path.display(), sheet, "read worksheet");
    Ok(RawTable { rows })
}
