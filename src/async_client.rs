//! Async wrapper around [`StockDashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all dashboard operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Workbook reads and DuckDB queries are blocking but short.
//!
//! # Example
//!
//! ```no_run
//! use stock_dashboard::AsyncStockDashboard;
//!
//! #[tokio::main]
//! async fn main() {
//!     let dash = AsyncStockDashboard::builder()
//!         .source("TRUE-SET-19May2025-6M.xlsx")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     // Run any sync method via closure
//!     let page = dash.run(|d| d.months().page(0)).await.unwrap();
//!
//!     // Convenience methods for common views
//!     let chart = dash.chart().await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{ChartData, LatestSummary, MonthPage, MonthPeriod, Metric};
use crate::StockDashboard;

// ---------------------------------------------------------------------------
// AsyncStockDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncStockDashboard`] instance.
pub struct AsyncStockDashboardBuilder {
    source: Option<PathBuf>,
    sheet: String,
    skip_rows: usize,
    symbol: String,
}

impl Default for AsyncStockDashboardBuilder {
    fn default() -> Self {
        Self {
            source: None,
            sheet: config::DEFAULT_SHEET.to_string(),
            skip_rows: config::DEFAULT_SKIP_ROWS,
            symbol: config::DEFAULT_SYMBOL.to_string(),
        }
    }
}

impl AsyncStockDashboardBuilder {
    /// Set the workbook to load.
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the worksheet name.
    pub fn sheet(mut self, sheet: &str) -> Self {
        self.sheet = sheet.to_string();
        self
    }

    /// Set the number of title rows above the header.
    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    /// Set the ticker used in titles.
    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }

    /// Build the async dashboard, loading the workbook eagerly.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncStockDashboard> {
        tokio::task::spawn_blocking(move || {
            let mut builder = StockDashboard::builder()
                .sheet(&self.sheet)
                .skip_rows(self.skip_rows)
                .symbol(&self.symbol);
            if let Some(path) = self.source {
                builder = builder.source(path);
            }
            let dash = builder.build()?;
            Ok(AsyncStockDashboard {
                inner: Arc::new(Mutex::new(dash)),
            })
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncStockDashboard
// ---------------------------------------------------------------------------

/// Async wrapper around [`StockDashboard`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`StockDashboard`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
#[derive(Clone)]
pub struct AsyncStockDashboard {
    inner: Arc<Mutex<StockDashboard>>,
}

impl AsyncStockDashboard {
    /// Create a new builder for configuring the async dashboard.
    pub fn builder() -> AsyncStockDashboardBuilder {
        AsyncStockDashboardBuilder::default()
    }

    /// Wrap an already built dashboard.
    pub fn new(dash: StockDashboard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dash)),
        }
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    ///
    /// The closure receives a `&StockDashboard` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&StockDashboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dash = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = dash
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("Dashboard lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Latest-day figures.
    pub async fn summary(&self) -> Result<Option<LatestSummary>> {
        self.run(|d| d.summary().latest()).await
    }

    /// Formatted headline metrics.
    pub async fn metrics(&self) -> Result<Vec<Metric>> {
        self.run(|d| d.summary().metrics()).await
    }

    /// Close prices and trend line.
    pub async fn chart(&self) -> Result<ChartData> {
        self.run(|d| d.chart().data()).await
    }

    /// Months in the paging window, oldest first.
    pub async fn months(&self) -> Result<Vec<MonthPeriod>> {
        self.run(|d| d.months().recent(config::MONTH_WINDOW)).await
    }

    /// One page of the monthly table.
    pub async fn month_page(&self, index: usize) -> Result<MonthPage> {
        self.run(move |d| d.months().page(index)).await
    }

    /// Reload the workbook if it changed on disk.
    pub async fn refresh(&self) -> Result<bool> {
        self.run(|d| d.refresh()).await
    }

    /// Page heading.
    pub async fn title(&self) -> Result<String> {
        self.run(|d| Ok(d.title())).await
    }
}
