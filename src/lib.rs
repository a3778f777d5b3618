//! Stock dashboard data for Rust.
//!
//! Loads a SET daily-history workbook (Thai dates, Buddhist-era years),
//! caches the parsed series per source, registers it in an in-process
//! DuckDB table, and answers the questions a single-stock dashboard asks:
//! latest metrics, close prices with a least-squares trend line, and a
//! month-by-month table.
//!
//! # Quick start
//!
//! ```no_run
//! use stock_dashboard::StockDashboard;
//!
//! let dash = StockDashboard::builder()
//!     .source("TRUE-SET-19May2025-6M.xlsx")
//!     .build()
//!     .unwrap();
//!
//! let metrics = dash.summary().metrics().unwrap();
//! let chart = dash.chart().data().unwrap();
//! let first_page = dash.months().page(0).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod loader;
pub mod models;
pub mod queries;
pub mod source;
pub mod sql_builder;
pub mod thai_date;
pub mod trend;

#[cfg(feature = "async")]
pub use async_client::AsyncStockDashboard;
pub use cache::SourceCache;
pub use connection::Connection;
pub use error::{DashboardError, Result};
pub use source::SourceSpec;
pub use sql_builder::SqlBuilder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use models::LoadReport;

// ---------------------------------------------------------------------------
// StockDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`StockDashboard`] instance.
///
/// Use [`StockDashboard::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](StockDashboardBuilder::build).
pub struct StockDashboardBuilder {
    source: Option<PathBuf>,
    sheet: String,
    skip_rows: usize,
    symbol: String,
    eager: bool,
}

impl Default for StockDashboardBuilder {
    fn default() -> Self {
        Self {
            source: None,
            sheet: config::DEFAULT_SHEET.to_string(),
            skip_rows: config::DEFAULT_SKIP_ROWS,
            symbol: config::DEFAULT_SYMBOL.to_string(),
            eager: true,
        }
    }
}

impl StockDashboardBuilder {
    /// Set the workbook to load.
    ///
    /// Without a source the dashboard starts empty; register a series through
    /// [`StockDashboard::connection()`] instead.
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the worksheet name. Defaults to `"TRUE"`.
    pub fn sheet(mut self, sheet: &str) -> Self {
        self.sheet = sheet.to_string();
        self
    }

    /// Set the number of title rows above the header. Defaults to 1.
    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    /// Set the ticker used in titles. Defaults to `"TRUE"`.
    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }

    /// Load the workbook during [`build()`](Self::build) (the default), so a
    /// missing file, wrong sheet or bad header fails here rather than on the
    /// first query.
    pub fn eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    /// Build the dashboard, creating the cache and DuckDB connection.
    pub fn build(self) -> Result<StockDashboard> {
        let spec = self.source.map(|path| {
            SourceSpec::new(path)
                .sheet(&self.sheet)
                .skip_rows(self.skip_rows)
        });
        let eager = self.eager && spec.is_some();
        let conn = Connection::new(SourceCache::new(), spec)?;
        if eager {
            conn.ensure_prices()?;
        }
        Ok(StockDashboard {
            conn,
            symbol: self.symbol,
        })
    }
}

// ---------------------------------------------------------------------------
// StockDashboard
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Wraps a [`Connection`] (which owns the [`SourceCache`] and DuckDB database)
/// and exposes query interfaces as lightweight borrowing wrappers.
///
/// Created via [`StockDashboard::builder()`].
pub struct StockDashboard {
    conn: Connection,
    symbol: String,
}

impl StockDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> StockDashboardBuilder {
        StockDashboardBuilder::default()
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection, symbol: &str) -> Self {
        Self {
            conn,
            symbol: symbol.to_string(),
        }
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the daily price query interface.
    pub fn prices(&self) -> queries::PriceQuery<'_> {
        queries::PriceQuery::new(&self.conn)
    }

    /// Access the monthly table interface.
    pub fn months(&self) -> queries::MonthQuery<'_> {
        queries::MonthQuery::new(&self.conn)
    }

    /// Access the chart interface (closes plus trend line).
    pub fn chart(&self) -> queries::ChartQuery<'_> {
        queries::ChartQuery::new(&self.conn, &self.symbol)
    }

    /// Access the summary metrics interface.
    pub fn summary(&self) -> queries::SummaryQuery<'_> {
        queries::SummaryQuery::new(&self.conn)
    }

    // -- Metadata and utility methods --------------------------------------

    /// The ticker shown in titles.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Page heading, e.g. `"สรุปข้อมูลหุ้น TRUE (6 เดือนย้อนหลัง)"`.
    pub fn title(&self) -> String {
        format!(
            "สรุปข้อมูลหุ้น {} ({} เดือนย้อนหลัง)",
            self.symbol,
            config::MONTH_WINDOW
        )
    }

    /// What the last load kept and dropped, once something is loaded.
    pub fn load_report(&self) -> Result<Option<LoadReport>> {
        if self.conn.source().is_some() {
            self.conn.ensure_prices()?;
        }
        Ok(self.conn.load_report())
    }

    /// Execute a raw SQL query against the DuckDB database.
    ///
    /// Provides escape-hatch access for queries not covered by the
    /// query interfaces. The `prices` table is loaded first.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.ensure_prices()?;
        self.conn.execute(query, params)
    }

    /// Reload the workbook if it changed on disk.
    ///
    /// Returns `true` if the cached data was stale and has been dropped
    /// (the next query reloads it), or `false` if it was up to date, never
    /// loaded, or no source is configured.
    pub fn refresh(&self) -> Result<bool> {
        let Some(spec) = self.conn.source() else {
            return Ok(false);
        };
        let stale = {
            let cache = self.conn.cache.borrow();
            cache.contains(spec) && cache.is_stale(spec)?
        };
        if stale {
            self.conn.cache.borrow_mut().invalidate(spec);
            self.conn.reset_tables();
            tracing::info!(path = %spec.path.display(), "source was stale; cache invalidated");
        }
        Ok(stale)
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for StockDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.conn.series().map(|s| s.len()).unwrap_or(0);
        match self.conn.source() {
            Some(spec) => write!(
                f,
                "StockDashboard(symbol={}, source={}, sheet={}, rows={})",
                self.symbol,
                spec.path.display(),
                spec.sheet,
                rows
            ),
            None => write!(f, "StockDashboard(symbol={}, rows={})", self.symbol, rows),
        }
    }
}
