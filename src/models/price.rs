use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceRecord — One trading day from the history sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub average: f64,
    pub close: f64,
    pub change: f64,
    pub change_percent: f64,
    /// Thousands of shares.
    pub volume: i64,
    /// Millions of baht.
    pub turnover: f64,
    pub market_index: f64,
    pub market_index_change_percent: f64,
}

// ---------------------------------------------------------------------------
// TrendPoint — Fitted close for one observed date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub predicted_close: f64,
}

// ---------------------------------------------------------------------------
// ClosePoint — Observed close, as plotted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

// ---------------------------------------------------------------------------
// LoadReport — What the loader kept and dropped
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoadReport {
    /// Data rows seen below the header.
    pub rows_read: usize,
    /// Repeated header rows.
    pub header_rows: usize,
    pub missing_date: usize,
    pub unparseable_date: usize,
    /// Rows with an empty or non-numeric value cell.
    pub missing_values: usize,
    /// Later rows for a date that was already loaded.
    pub duplicates: usize,
    pub kept: usize,
}

impl LoadReport {
    /// Total rows dropped for any reason.
    pub fn dropped(&self) -> usize {
        self.header_rows
            + self.missing_date
            + self.unparseable_date
            + self.missing_values
            + self.duplicates
    }
}

// ---------------------------------------------------------------------------
// PriceSeries — Sorted, date-unique records plus their load report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub records: Vec<PriceRecord>,
    pub report: LoadReport,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&PriceRecord> {
        self.records.last()
    }

    /// `(date, close)` pairs in date order, as fed to the trend estimator.
    pub fn closes(&self) -> Vec<(NaiveDate, f64)> {
        self.records.iter().map(|r| (r.date, r.close)).collect()
    }
}
