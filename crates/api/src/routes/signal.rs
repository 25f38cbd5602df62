use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::warn;

use common::{Error, StepResult, WalkerStatus};
use engine::Walker;

use crate::AppState;

pub fn signal_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/signal/next", get(next_signal))
        .route("/signal/reset", get(reset_cursor))
        .route("/signal/current", get(current_status))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Walk-forward signal evaluation API",
        "status": "active",
    }))
}

/// Step the walker once and return the full evaluation envelope.
async fn next_signal(State(state): State<AppState>) -> Result<Json<StepResult>, ApiError> {
    let walker = walker(&state).await?;
    let result = walker.step().await?;
    Ok(Json(result))
}

async fn reset_cursor(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let walker = walker(&state).await?;
    walker.reset().await;
    Ok(Json(json!({
        "message": "Index reset to 0",
        "current_index": 0,
    })))
}

async fn current_status(State(state): State<AppState>) -> Result<Json<WalkerStatus>, ApiError> {
    let walker = walker(&state).await?;
    Ok(Json(walker.status().await))
}

async fn walker(state: &AppState) -> Result<Arc<Walker>, ApiError> {
    state
        .walker
        .read()
        .await
        .clone()
        .ok_or_else(|| ApiError::from(Error::NotInitialized))
}

/// Maps the core error taxonomy onto caller-facing status codes.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match err {
            Error::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            Error::InsufficientData { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!(error = %err, "Unexpected error surfaced to the API");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
