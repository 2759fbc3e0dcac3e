//! Health endpoint.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::websocket::RelayState;
use crate::domain::relay::RelayMode;

/// Response body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub relay: RelayMode,
    pub active_sessions: usize,
    pub timestamp: DateTime<Utc>,
}

/// Reports liveness and how the relay is configured.
///
/// The broker itself is not contacted; a disabled relay is still healthy.
pub async fn health(State(state): State<RelayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        relay: state.mode,
        active_sessions: state.sessions.active(),
        timestamp: Utc::now(),
    })
}
