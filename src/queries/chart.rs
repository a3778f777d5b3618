//! Close-price chart series with the fitted trend line.

use crate::error::Result;
use crate::models::{ChartData, ClosePoint};
use crate::queries::prices::PriceQuery;
use crate::trend;

// ---------------------------------------------------------------------------
// ChartQuery
// ---------------------------------------------------------------------------

/// Builds the data behind the close-price chart.
pub struct ChartQuery<'a> {
    conn: &'a crate::connection::Connection,
    symbol: &'a str,
}

impl<'a> ChartQuery<'a> {
    /// Create a new `ChartQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection, symbol: &'a str) -> Self {
        Self { conn, symbol }
    }

    /// Observed closes and one trend value per observed date.
    pub fn data(&self) -> Result<ChartData> {
        let records = PriceQuery::new(self.conn).all()?;
        let (line, trend) = match trend::fit_trend(&records) {
            Some((line, points)) => (Some(line), points),
            None => (None, Vec::new()),
        };

        Ok(ChartData {
            title: format!("แนวโน้มราคาปิดหุ้น {}", self.symbol),
            actual: records
                .iter()
                .map(|r| ClosePoint {
                    date: r.date,
                    close: r.close,
                })
                .collect(),
            trend,
            slope_per_day: line.map(|l| l.slope()),
            intercept: line.map(|l| l.intercept()),
        })
    }
}
