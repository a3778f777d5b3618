//! Price queries against the DuckDB `prices` table.

use chrono::NaiveDate;

use crate::config;
use crate::error::Result;
use crate::models::PriceRecord;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// PriceQuery
// ---------------------------------------------------------------------------

/// Query interface for daily price records.
pub struct PriceQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> PriceQuery<'a> {
    /// Create a new `PriceQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// All records, oldest first.
    pub fn all(&self) -> Result<Vec<PriceRecord>> {
        self.history(None, None)
    }

    /// Records between two dates (both inclusive), oldest first.
    pub fn history(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<PriceRecord>> {
        self.conn.ensure_prices()?;

        let mut qb = SqlBuilder::new(config::PRICES_TABLE);
        qb.select(&config::price_select());
        qb.order_by(&["prices.date ASC"]);

        if let Some(df) = date_from {
            qb.where_clause("prices.date >= CAST(? AS DATE)", &[df.to_string().as_str()]);
        }

        if let Some(dt) = date_to {
            qb.where_clause("prices.date <= CAST(? AS DATE)", &[dt.to_string().as_str()]);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// The record for a single trading day.
    pub fn get(&self, date: NaiveDate) -> Result<Option<PriceRecord>> {
        self.conn.ensure_prices()?;

        let (sql, params) = SqlBuilder::new(config::PRICES_TABLE)
            .select(&config::price_select())
            .where_clause("prices.date = CAST(? AS DATE)", &[date.to_string().as_str()])
            .limit(1)
            .build();

        Ok(self.conn.execute_into(&sql, &params)?.into_iter().next())
    }

    /// The most recent record.
    pub fn latest(&self) -> Result<Option<PriceRecord>> {
        self.conn.ensure_prices()?;

        let (sql, params) = SqlBuilder::new(config::PRICES_TABLE)
            .select(&config::price_select())
            .order_by(&["prices.date DESC"])
            .limit(1)
            .build();

        Ok(self.conn.execute_into(&sql, &params)?.into_iter().next())
    }

    /// Number of trading days loaded.
    pub fn count(&self) -> Result<usize> {
        self.conn.ensure_prices()?;

        let (sql, params) = SqlBuilder::new(config::PRICES_TABLE)
            .select(&["COUNT(*) AS n"])
            .build();

        let n = self
            .conn
            .execute_scalar(&sql, &params)?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(n as usize)
    }
}
