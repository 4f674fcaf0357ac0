use crate::{AppState, LOG_TARGET, health};

use std::net::SocketAddr;

use axum::{
    Extension, Router,
    extract::{ConnectInfo, State},
    http::{Method, Uri},
    response::Response,
    routing::get,
};
use log::info;

const PROBE_ROUTES: [&str; 3] = ["/health", "/live", "/ready"];

/// Build the application router with all endpoints
pub fn build_router(state: AppState, sse_path: &str) -> Router {
    Router::new()
        // SSE endpoint
        .route(sse_path, get(sse_stream))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
}

/// `GET` paths served by [`build_router`], for the startup log.
pub fn registered_routes(sse_path: &str) -> Vec<String> {
    std::iter::once(sse_path)
        .chain(PROBE_ROUTES)
        .map(|path| format!("GET {}", path))
        .collect()
}

/// GET <sse path> - Attach the caller to the live event stream
async fn sse_stream(
    State(state): State<AppState>,
    connect_info: Option<Extension<ConnectInfo<SocketAddr>>>,
    method: Method,
    uri: Uri,
) -> Response {
    let peer = connect_info
        .map(|Extension(ConnectInfo(addr))| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    info!(target: LOG_TARGET, "{} {} from {}", method, uri, peer);

    state.sse.serve(peer)
}
