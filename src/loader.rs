//! Turns a raw sheet into a sorted, date-unique [`PriceSeries`].
//!
//! Layout: `skip_rows` title rows, one header row with the twelve columns of
//! [`config::HEADER_COLUMNS`], then one row per trading day. Rows that cannot
//! be used are dropped and counted in the [`LoadReport`], never reported as
//! errors. A header with the wrong number of columns is a schema error.

use std::collections::HashSet;

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{LoadReport, PriceRecord, PriceSeries};
use crate::source::{Cell, RawTable};
use crate::thai_date;

/// Load price records from a raw sheet.
pub fn load_prices(table: &RawTable, skip_rows: usize) -> Result<PriceSeries> {
    let mut rows = table.rows.iter().skip(skip_rows);

    let header = rows
        .next()
        .ok_or_else(|| DashboardError::Schema("Sheet has no header row".to_string()))?;
    check_header(header)?;

    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for row in rows {
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        report.rows_read += 1;

        let date_text = match row.first() {
            None | Some(Cell::Empty) => {
                report.missing_date += 1;
                continue;
            }
            Some(Cell::Text(s)) if s.trim().is_empty() => {
                report.missing_date += 1;
                continue;
            }
            Some(Cell::Text(s)) => s.as_str(),
            Some(Cell::Number(n)) => {
                tracing::debug!(value = n, "dropping row with numeric date cell");
                report.unparseable_date += 1;
                continue;
            }
        };

        if date_text.contains(config::DATE_HEADER) {
            report.header_rows += 1;
            continue;
        }

        let Some(date) = thai_date::parse_thai_date(date_text) else {
            tracing::debug!(date = date_text, "dropping row with unparseable date");
            report.unparseable_date += 1;
            continue;
        };

        let mut values = [0f64; 11];
        let mut complete = true;
        for (i, slot) in values.iter_mut().enumerate() {
            match row.get(i + 1).and_then(parse_number) {
                Some(v) => *slot = v,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            tracing::debug!(%date, "dropping row with missing values");
            report.missing_values += 1;
            continue;
        }

        let [open, high, low, average, close, change, change_percent, volume, turnover, market_index, market_index_change_percent] =
            values;
        records.push(PriceRecord {
            date,
            open,
            high,
            low,
            average,
            close,
            change,
            change_percent,
            volume: volume.round() as i64,
            turnover,
            market_index,
            market_index_change_percent,
        });
    }

    // Stable sort keeps sheet order among equal dates, so "first" below means
    // first in the sheet.
    records.sort_by_key(|r| r.date);
    let before = records.len();
    let mut seen = HashSet::new();
    records.retain(|r| {
        let fresh = seen.insert(r.date);
        if !fresh {
            tracing::warn!(date = %r.date, "duplicate trading day, keeping first row");
        }
        fresh
    });
    report.duplicates = before - records.len();
    report.kept = records.len();

    Ok(PriceSeries { records, report })
}

/// The header must name exactly the twelve expected columns by position.
/// Names are not compared, only the count, so renamed exports still load.
fn check_header(header: &[Cell]) -> Result<()> {
    let width = header
        .iter()
        .rposition(|c| !c.is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);
    if width != config::HEADER_COLUMNS.len() {
        return Err(DashboardError::Schema(format!(
            "Expected {} header columns, found {}",
            config::HEADER_COLUMNS.len(),
            width
        )));
    }
    Ok(())
}

/// Numeric value of a cell; text may carry thousands separators.
/// Empty cells and dashes count as missing.
fn parse_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Number(_) | Cell::Empty => None,
        Cell::Text(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
            if cleaned.is_empty() || cleaned == "-" {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
    }
}
