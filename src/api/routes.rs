//! API route handlers

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::Result;
use crate::signal::{parse_timestamp, SignalResponse};

#[derive(Serialize)]
pub struct IndexResponse {
    pub message: String,
}

/// GET /
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: format!(
            "Tianji V{} is running. Query /v1/signal/now for the current signal.",
            env!("CARGO_PKG_VERSION")
        ),
    })
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// GET /v1/signal/now
pub async fn signal_now(State(state): State<AppState>) -> Result<Json<SignalResponse>> {
    let now = state.clock.now();
    SignalResponse::compute(&state.engine, now).map(Json)
}

#[derive(Deserialize)]
pub struct SignalAtQuery {
    pub ts: String,
}

/// GET /v1/signal/at?ts=2024-02-10T10:00:00
pub async fn signal_at(
    State(state): State<AppState>,
    Query(query): Query<SignalAtQuery>,
) -> Result<Json<SignalResponse>> {
    let timestamp = parse_timestamp(&query.ts)?;
    SignalResponse::compute(&state.engine, timestamp).map(Json)
}
