use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn health_router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// Health check endpoint. Reports whether the walker is initialized yet and
/// how much data it holds; never fails.
async fn healthz(State(state): State<AppState>) -> Json<Value> {
    match state.walker.read().await.as_ref() {
        Some(walker) => {
            let status = walker.status().await;
            Json(json!({
                "status": "healthy",
                "data_points": status.total_candles,
                "current_index": status.current_index,
                "service_initialized": true,
            }))
        }
        None => Json(json!({
            "status": "healthy",
            "data_points": 0,
            "current_index": 0,
            "service_initialized": false,
        })),
    }
}
