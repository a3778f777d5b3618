use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price::{ClosePoint, PriceRecord, TrendPoint};

// ---------------------------------------------------------------------------
// LatestSummary — Figures from the most recent trading day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LatestSummary {
    pub date: NaiveDate,
    pub close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: i64,
    pub market_index: f64,
    pub market_index_change_percent: f64,
}

impl From<&PriceRecord> for LatestSummary {
    fn from(r: &PriceRecord) -> Self {
        Self {
            date: r.date,
            close: r.close,
            change: r.change,
            change_percent: r.change_percent,
            volume: r.volume,
            market_index: r.market_index,
            market_index_change_percent: r.market_index_change_percent,
        }
    }
}

// ---------------------------------------------------------------------------
// Metric — A labelled, formatted headline figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

// ---------------------------------------------------------------------------
// ChartData — Observed closes and the fitted trend line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChartData {
    pub title: String,
    pub actual: Vec<ClosePoint>,
    pub trend: Vec<TrendPoint>,
    /// Baht per calendar day; `None` when there is no data.
    pub slope_per_day: Option<f64>,
    pub intercept: Option<f64>,
}
