//! HTTP API
//!
//! - `GET /` - liveness banner
//! - `GET /health` - plain liveness probe
//! - `GET /v1/signal/now` - signal for the current wall-clock time
//! - `GET /v1/signal/at?ts=...` - signal for an explicit timestamp

pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::clock::Clock;
use crate::engine::SignalEngine;

/// State shared across handlers. Read-only for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub engine: SignalEngine,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(engine: SignalEngine, clock: Arc<dyn Clock>) -> Self {
        Self { engine, clock }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/v1/signal/now", get(routes::signal_now))
        .route("/v1/signal/at", get(routes::signal_at))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
