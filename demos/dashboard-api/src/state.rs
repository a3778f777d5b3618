/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async dashboard. Dispatches blocking workbook reads and DuckDB
    /// queries to a thread pool internally.
    pub dashboard: stock_dashboard::AsyncStockDashboard,
}
