mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use state::AppState;

const DEFAULT_WORKBOOK: &str = "TRUE-SET-6M.xlsx";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let workbook = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_WORKBOOK.to_string());

    tracing::info!(%workbook, "loading workbook");
    let dashboard = stock_dashboard::AsyncStockDashboard::builder()
        .source(&workbook)
        .build()
        .await
        .expect("Failed to load workbook");
    tracing::info!("dashboard ready");

    let state = Arc::new(AppState { dashboard });

    let app = Router::new()
        .route("/api/meta", get(routes::meta::get_meta))
        .route("/api/refresh", post(routes::meta::refresh))
        .route("/api/summary", get(routes::dashboard::get_summary))
        .route("/api/metrics", get(routes::dashboard::get_metrics))
        .route("/api/chart", get(routes::dashboard::get_chart))
        .route("/api/months", get(routes::months::list_months))
        .route("/api/months/{page}", get(routes::months::get_month_page))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
