//! Shared test fixtures for the stock dashboard integration tests.
//!
//! Provides a sample seven-month daily history (Nov 2024 to May 2025, two
//! trading days per month) both as raw sheet rows and as a DuckDB
//! connection with the `prices` table registered, plus a helper that writes
//! rows to a real `.xlsx` workbook.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use stock_dashboard::config;
use stock_dashboard::loader::load_prices;
use stock_dashboard::models::PriceSeries;
use stock_dashboard::source::{Cell, RawTable};
use stock_dashboard::{Connection, SourceCache};

/// `(year, month)` of every sample month, oldest first.
pub const MONTHS: [(i32, u32); 7] = [
    (2024, 11),
    (2024, 12),
    (2025, 1),
    (2025, 2),
    (2025, 3),
    (2025, 4),
    (2025, 5),
];

/// Trading days used in every sample month.
pub const DAYS: [u32; 2] = [2, 15];

/// Number of data rows in the sample sheet.
pub const ROW_COUNT: usize = MONTHS.len() * DAYS.len();

/// Format a Gregorian date the way the SET export does, e.g. `"2 ม.ค. 2568"`.
pub fn thai_date(year: i32, month: u32, day: u32) -> String {
    let (abbr, _) = config::MONTH_ABBREVIATIONS[(month - 1) as usize];
    format!("{} {} {}", day, abbr, year + config::BUDDHIST_ERA_OFFSET)
}

/// One data row. `i` is the row's position in date order and drives every
/// value so tests can predict them.
pub fn data_row(date: &str, i: usize) -> Vec<Cell> {
    let close = 3.0 + 0.1 * i as f64;
    let mut row = vec![Cell::from(date)];
    row.extend(
        [
            close - 0.05,
            close + 0.1,
            close - 0.1,
            close,
            close,
            0.1,
            2.5,
            100_000.0 + 1_000.0 * i as f64,
            350.0 + i as f64,
            1_200.0 + i as f64,
            0.25,
        ]
        .into_iter()
        .map(Cell::from),
    );
    row
}

pub fn header_row() -> Vec<Cell> {
    config::HEADER_COLUMNS.iter().map(|h| Cell::from(*h)).collect()
}

/// Title row, header row, then the sample rows newest first, as exported.
pub fn sample_rows() -> Vec<Vec<Cell>> {
    let mut data = Vec::new();
    let mut i = 0;
    for (year, month) in MONTHS {
        for day in DAYS {
            data.push(data_row(&thai_date(year, month, day), i));
            i += 1;
        }
    }
    data.reverse();

    let mut rows = vec![vec![Cell::from("TRUE : ข้อมูลราคาย้อนหลัง 6 เดือน")], header_row()];
    rows.extend(data);
    rows
}

pub fn sample_series() -> PriceSeries {
    load_prices(&RawTable::new(sample_rows()), config::DEFAULT_SKIP_ROWS).unwrap()
}

/// Create a `Connection` with no workbook source and the sample series
/// registered as the `prices` table.
pub fn setup_sample_db() -> Connection {
    let conn = Connection::new(SourceCache::new(), None).unwrap();
    conn.register_prices(&sample_series()).unwrap();
    conn
}

/// Write `rows` to a single-sheet workbook at `dir/name`.
pub fn write_workbook(dir: &Path, name: &str, sheet: &str, rows: &[Vec<Cell>]) -> PathBuf {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(r as u32, c as u16, s.as_str()).unwrap();
                }
                Cell::Number(n) => {
                    worksheet.write_number(r as u32, c as u16, *n).unwrap();
                }
            }
        }
    }

    let path = dir.join(name);
    workbook.save(&path).unwrap();
    path
}

/// Write the sample rows to `dir/prices.xlsx` on the default sheet.
pub fn write_sample_workbook(dir: &Path) -> PathBuf {
    write_workbook(dir, "prices.xlsx", config::DEFAULT_SHEET, &sample_rows())
}
