//! Liveness and readiness probes for process supervisors.

use crate::model::Item;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

/// The process is up and serving.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Ready once the item table exists and can be read.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match CrudService::count::<Item>(&state.pool).await {
        Ok(items) => (StatusCode::OK, Json(json!({ "status": "ok", "items": items }))),
        Err(e) => {
            tracing::warn!(error = %e, "item table unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "unavailable" })))
        }
    }
}

pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
