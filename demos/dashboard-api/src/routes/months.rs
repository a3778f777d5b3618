use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/months
///
/// Months in the paging window, oldest first, with their Thai headings.
pub async fn list_months(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let months = state.dashboard.months().await?;

    let data: Vec<Value> = months
        .iter()
        .enumerate()
        .map(|(page, m)| {
            json!({
                "page": page,
                "month": m.to_string(),
                "label": m.thai_label(),
            })
        })
        .collect();

    let count = data.len();
    Ok(Json(json!({ "data": data, "count": count })))
}

/// GET /api/months/:page
///
/// One month of daily rows. Page 0 is the oldest month in the window.
pub async fn get_month_page(
    State(state): State<Arc<AppState>>,
    Path(page): Path<usize>,
) -> Result<Json<Value>, AppError> {
    let page = state.dashboard.month_page(page).await?;
    Ok(Json(json!({ "data": page })))
}
