use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::get_metrics;
use crate::startup::AppState;

/// Liveness: the process is up and serving.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "cryptvest-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness: the store is configured and answers a ping.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let store = match state.store.store() {
        Ok(store) => store,
        Err(_) => return StatusCode::SERVICE_UNAVAILABLE,
    };

    match store.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
