//! Query modules for the stock dashboard.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and returns typed models.

pub mod chart;
pub mod months;
pub mod prices;
pub mod summary;

pub use chart::ChartQuery;
pub use months::MonthQuery;
pub use prices::PriceQuery;
pub use summary::SummaryQuery;
