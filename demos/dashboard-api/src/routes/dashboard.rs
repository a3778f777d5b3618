use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/summary
///
/// Latest close, change, SET index and volume.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let summary = state
        .dashboard
        .summary()
        .await?
        .ok_or_else(|| AppError::not_found("No price data loaded"))?;

    Ok(Json(json!({ "data": summary })))
}

/// GET /api/metrics
///
/// The same figures, formatted for display.
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let metrics = state.dashboard.metrics().await?;
    Ok(Json(json!({ "data": metrics })))
}

/// GET /api/chart
///
/// Daily closes with the least-squares trend line.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let chart = state.dashboard.chart().await?;
    Ok(Json(json!({ "data": chart })))
}
