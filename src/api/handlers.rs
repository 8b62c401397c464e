//! Request handlers
//!
//! Handlers pick a [`WireFormat`] from the request headers and hand the body
//! to the [`EventProcessor`](crate::processor::EventProcessor). Upload
//! responses and every error body are JSON regardless of the request format.

use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        request::Parts,
        HeaderMap, HeaderName, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use super::state::AppState;
use crate::codec::WireFormat;
use crate::error::ErrorKind;
use crate::processor::Rejection;
use crate::types::{ClientEventData, ErrorResponse, HeartBeat};
use crate::utils::time::utc_now_string;

/// Event id taken from the `{id}` path segment.
///
/// Only ids matching `^[0-9]+$` are accepted; anything else is answered by
/// the catch-all not-found response before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericEventId(pub String);

/// True for non-empty all-digit ids
pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

#[async_trait]
impl<S> FromRequestParts<S> for NumericEventId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) if is_numeric_id(&id) => Ok(NumericEventId(id)),
            _ => Err(not_found().await.into_response()),
        }
    }
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn unsupported_media(method: &'static str, header: &'static str, value: Option<&str>) -> Rejection {
    info!(
        method,
        error = %ErrorKind::UnsupportedMedia,
        "{}: {}",
        header,
        value.unwrap_or_default()
    );
    Rejection::unsupported_media(header)
}

/// GET /heartbeat
pub async fn heartbeat() -> Json<HeartBeat> {
    Json(HeartBeat::ok(utc_now_string()))
}

/// Catch-all for unmatched routes and methods
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found()))
}

/// POST /v1/events - Decode and store an event bundle
pub async fn create_events(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, Rejection> {
    let content_type = header_str(&headers, CONTENT_TYPE);
    let format = WireFormat::from_content_type(content_type)
        .ok_or_else(|| unsupported_media("create_events", "Content-Type", content_type))?;

    let bundle = state.processor.decode_upload(format, &body)?;
    state.processor.process_upload(bundle)?;
    Ok(StatusCode::OK)
}

/// GET /v1/events/:id - Retrieve a single event in the accepted format
pub async fn retrieve_event(
    State(state): State<Arc<AppState>>,
    NumericEventId(id): NumericEventId,
    headers: HeaderMap,
) -> Result<Response, Rejection> {
    let accept = header_str(&headers, ACCEPT);
    let format = WireFormat::from_accept(accept)
        .ok_or_else(|| unsupported_media("retrieve_event", "Accept", accept))?;

    let event = state.processor.process_retrieve(&id)?;
    encode_event(format, &id, &event)
}

fn encode_event(
    format: WireFormat,
    id: &str,
    event: &ClientEventData,
) -> Result<Response, Rejection> {
    let body = format.codec().encode_record(event).map_err(|err| {
        warn!(
            method = "retrieve_event",
            id = %id,
            format = %format,
            error = %ErrorKind::Fatal,
            cause = %err,
            "Error encoding event"
        );
        Rejection::empty(ErrorKind::Fatal, StatusCode::INTERNAL_SERVER_ERROR)
    })?;

    Ok((StatusCode::OK, [(CONTENT_TYPE, format.media_type())], body).into_response())
}
