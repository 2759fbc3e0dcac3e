//! HTTP adapters - Router assembly.
//!
//! - `GET {websocket_path}` - STOMP over WebSocket, relayed to the broker
//! - `GET /health` - Liveness and relay mode

pub mod health;

pub use health::{health, HealthResponse};

use axum::{routing::get, Router};
use http::{HeaderValue, Method};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::websocket::{ws_handler, RelayState};
use crate::config::ServerConfig;

/// Create the application router.
///
/// The request timeout only applies to plain HTTP routes; relayed WebSocket
/// sessions live as long as both sides keep them open.
pub fn app_router(state: RelayState, server: &ServerConfig) -> Router {
    let http_routes = Router::new()
        .route("/health", get(health))
        .layer(TimeoutLayer::new(server.request_timeout()));

    Router::new()
        .route(&server.websocket_path, get(ws_handler))
        .merge(http_routes)
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
}
