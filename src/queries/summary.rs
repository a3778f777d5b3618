//! Headline figures from the most recent trading day.

use crate::error::Result;
use crate::models::{LatestSummary, Metric};
use crate::queries::prices::PriceQuery;

const CLOSE_LABEL: &str = "ราคาปิดล่าสุด";
const INDEX_LABEL: &str = "SET Index";
const VOLUME_LABEL: &str = "ปริมาณซื้อขาย";

// ---------------------------------------------------------------------------
// SummaryQuery
// ---------------------------------------------------------------------------

/// Query interface for the dashboard's summary metrics.
pub struct SummaryQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> SummaryQuery<'a> {
    /// Create a new `SummaryQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Figures of the latest record, or `None` when nothing is loaded.
    pub fn latest(&self) -> Result<Option<LatestSummary>> {
        Ok(PriceQuery::new(self.conn)
            .latest()?
            .as_ref()
            .map(LatestSummary::from))
    }

    /// Formatted metrics: latest close with its change, SET index, volume.
    ///
    /// Empty when nothing is loaded.
    pub fn metrics(&self) -> Result<Vec<Metric>> {
        Ok(self.latest()?.map(|s| format_metrics(&s)).unwrap_or_default())
    }
}

/// Render a summary as display metrics.
pub fn format_metrics(s: &LatestSummary) -> Vec<Metric> {
    vec![
        Metric {
            label: CLOSE_LABEL.to_string(),
            value: format!("{:.2} บาท", s.close),
            delta: Some(format!("{:.2} ({:.2}%)", s.change, s.change_percent)),
        },
        Metric {
            label: INDEX_LABEL.to_string(),
            value: format!("{:.2}", s.market_index),
            delta: None,
        },
        Metric {
            label: VOLUME_LABEL.to_string(),
            value: format!("{} พันหุ้น", s.volume),
            delta: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_like_the_dashboard() {
        let s = LatestSummary {
            date: NaiveDate::from_ymd_opt(2025, 5, 19).unwrap(),
            close: 11.7,
            change: -0.1,
            change_percent: -0.847,
            volume: 52_310,
            market_index: 1177.456,
            market_index_change_percent: 0.4,
        };
        let m = format_metrics(&s);
        assert_eq!(m[0].value, "11.70 บาท");
        assert_eq!(m[0].delta.as_deref(), Some("-0.10 (-0.85%)"));
        assert_eq!(m[1].value, "1177.46");
        assert_eq!(m[2].value, "52310 พันหุ้น");
        assert!(m[2].delta.is_none());
    }
}
