//! Monthly grouping and paging of the `prices` table.

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{MonthPage, MonthPeriod, PriceRecord};
use crate::sql_builder::SqlBuilder;

const MONTH_EXPR: &str = "strftime(prices.date, '%Y-%m')";

// ---------------------------------------------------------------------------
// MonthQuery
// ---------------------------------------------------------------------------

/// Query interface for calendar months present in the price table.
pub struct MonthQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> MonthQuery<'a> {
    /// Create a new `MonthQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Every month with at least one trading day, oldest first.
    pub fn list(&self) -> Result<Vec<MonthPeriod>> {
        self.conn.ensure_prices()?;

        let select = format!("{} AS month", MONTH_EXPR);
        let (sql, params) = SqlBuilder::new(config::PRICES_TABLE)
            .select(&[select.as_str()])
            .distinct()
            .order_by(&["month ASC"])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        rows.iter()
            .filter_map(|r| r.get("month").and_then(|v| v.as_str()))
            .map(|s| s.parse::<MonthPeriod>())
            .collect()
    }

    /// The `n` most recent months, oldest first.
    pub fn recent(&self, n: usize) -> Result<Vec<MonthPeriod>> {
        let mut months = self.list()?;
        let start = months.len().saturating_sub(n);
        Ok(months.split_off(start))
    }

    /// Records of one month, oldest first.
    pub fn rows(&self, month: MonthPeriod) -> Result<Vec<PriceRecord>> {
        self.conn.ensure_prices()?;

        let condition = format!("{} = ?", MONTH_EXPR);
        let (sql, params) = SqlBuilder::new(config::PRICES_TABLE)
            .select(&config::price_select())
            .where_clause(&condition, &[month.to_string().as_str()])
            .order_by(&["prices.date ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Number of pages in the month window.
    pub fn page_count(&self) -> Result<usize> {
        Ok(self.recent(config::MONTH_WINDOW)?.len())
    }

    /// One page of the monthly table.
    ///
    /// Pages cover the [`MONTH_WINDOW`](config::MONTH_WINDOW) most recent
    /// months; page 0 is the oldest of them.
    pub fn page(&self, index: usize) -> Result<MonthPage> {
        let months = self.recent(config::MONTH_WINDOW)?;
        if months.is_empty() {
            return Err(DashboardError::NotFound("No price data loaded".to_string()));
        }
        let month = *months.get(index).ok_or_else(|| {
            DashboardError::InvalidArgument(format!(
                "Page {} out of range (0..{})",
                index,
                months.len()
            ))
        })?;

        let rows = self.rows(month)?;
        Ok(MonthPage {
            index,
            total_pages: months.len(),
            month,
            label: month.thai_label(),
            has_prev: index > 0,
            has_next: index + 1 < months.len(),
            rows,
        })
    }
}
