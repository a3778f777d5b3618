use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/meta
///
/// Returns the page title, the loaded row count and what the loader dropped.
pub async fn get_meta(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let (title, report) = state
        .dashboard
        .run(|d| Ok((d.title(), d.load_report()?)))
        .await?;

    Ok(Json(json!({
        "title": title,
        "load_report": report,
    })))
}

/// POST /api/refresh
///
/// Drops the cached workbook if it changed on disk.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let reloaded = state.dashboard.refresh().await?;
    Ok(Json(json!({ "reloaded": reloaded })))
}
