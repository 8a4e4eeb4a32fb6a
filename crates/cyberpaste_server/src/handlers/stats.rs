//! Stats endpoints.

use crate::AppState;
use axum::{extract::State, Json};
use serde_json::json;

/// Number of live pastes, for the header display.
///
/// Serves the cached value when fresh; otherwise sweeps and recounts. A
/// transient backend failure degrades to a reported count of 0 instead of
/// failing the page.
pub async fn active_count(State(state): State<AppState>) -> Json<serde_json::Value> {
    if let Some(value) = state.counts.fresh_value() {
        return Json(json!({ "count": value }));
    }

    match state.service.active_paste_count().await {
        Ok(count) => {
            state.counts.store(count);
            Json(json!({ "count": count }))
        }
        Err(err) => {
            tracing::warn!("Active paste count unavailable: {}", err);
            Json(json!({ "count": 0 }))
        }
    }
}
