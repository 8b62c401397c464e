//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::handlers::{create_events, heartbeat, not_found, retrieve_event};
use super::state::AppState;

/// Create the Axum router with all endpoints.
///
/// Matched paths with an unsupported method get the same 404 body as
/// unmatched paths. Upload bodies are read whole with no size cap, so every
/// POST failure is answered by the JSON error contract rather than axum's
/// plain-text 413.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/heartbeat", get(heartbeat).fallback(not_found))
        // Event ingestion and retrieval
        .route("/v1/events", post(create_events).fallback(not_found))
        .route("/v1/events/:id", get(retrieve_event).fallback(not_found))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::new())
        // Access log: method + path + status + latency
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
