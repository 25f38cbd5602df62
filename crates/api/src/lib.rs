pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use engine::Walker;

/// The walker slot starts empty; the composition root fills it once the
/// historical series is loaded. Requests arriving before that resolve to
/// the not-initialized error.
pub type WalkerSlot = Arc<RwLock<Option<Arc<Walker>>>>;

/// Shared application state injected into every route handler.
#[derive(Clone)]
pub struct AppState {
    pub walker: WalkerSlot,
}

/// Build and run the Axum API server.
pub async fn serve(state: AppState, port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    let app = Router::new()
        .merge(routes::signal_router())
        .merge(routes::health_router())
        .with_state(state)
        .layer(cors);

    info!(%addr, "Signal API listening");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
