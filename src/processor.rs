//! Request processing
//!
//! Validates upload bundles, writes them through the [`EventStore`] and maps
//! every domain outcome to an HTTP status plus optional JSON error body.
//!
//! Bundle validation is all-or-nothing: one event without an id rejects the
//! whole bundle before anything is stored. Storage is not transactional: if a
//! `put` fails midway, events stored before it stay stored and the request
//! still reports `FATAL_OPERATION`.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info, warn};

use crate::codec::WireFormat;
use crate::error::{CodecError, ErrorKind, StoreError};
use crate::event_store::EventStore;
use crate::types::{ClientEventData, ClientEventUploadRequest, ErrorCode, ErrorResponse};

/// A request that ended in a domain error
#[derive(Debug, Clone)]
pub struct Rejection {
    kind: ErrorKind,
    status: StatusCode,
    body: Option<ErrorResponse>,
}

impl Rejection {
    pub fn new(kind: ErrorKind, status: StatusCode, body: ErrorResponse) -> Self {
        Self {
            kind,
            status,
            body: Some(body),
        }
    }

    /// Rejection answered with a status and an empty body
    pub fn empty(kind: ErrorKind, status: StatusCode) -> Self {
        Self {
            kind,
            status,
            body: None,
        }
    }

    /// `header` named a media type no codec handles
    pub fn unsupported_media(header: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedMedia,
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorResponse::new(
                ErrorCode::UnsupportedMediaType,
                format!(
                    "{} specifies a media type that is not supported by this resource",
                    header
                ),
            ),
        )
    }

    /// Request body could not be decoded as `format`
    pub fn malformed(format: WireFormat) -> Self {
        Self::new(
            ErrorKind::MalformedRequest,
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(
                ErrorCode::MalformedRequest,
                format.codec().malformed_message(),
            ),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&ErrorResponse> {
        self.body.as_ref()
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Index of the first event without an id, if any
pub fn first_invalid_event(events: &[ClientEventData]) -> Option<usize> {
    events.iter().position(|event| !event.has_event_id())
}

/// Validates, stores and retrieves client events
#[derive(Clone)]
pub struct EventProcessor {
    store: Arc<dyn EventStore>,
}

impl EventProcessor {
    /// Create a processor writing to `store`
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Decode an upload body in `format`
    pub fn decode_upload(
        &self,
        format: WireFormat,
        body: &[u8],
    ) -> Result<ClientEventUploadRequest, Rejection> {
        format.codec().decode_bundle(body).map_err(|err: CodecError| {
            warn!(
                method = "decode_upload",
                format = %format,
                error = %ErrorKind::MalformedRequest,
                cause = %err,
                "Error decoding request body"
            );
            Rejection::malformed(format)
        })
    }

    /// Validate the whole bundle, then store its events in order
    pub fn process_upload(&self, bundle: ClientEventUploadRequest) -> Result<(), Rejection> {
        let ClientEventUploadRequest {
            request_id,
            device_type,
            events,
        } = bundle;

        if let Some(index) = first_invalid_event(&events) {
            warn!(
                method = "process_upload",
                error = %ErrorKind::InvalidParameters,
                request_id = %request_id,
                index,
                "Error validating eventIds in the upload request"
            );
            return Err(Rejection::new(
                ErrorKind::InvalidParameters,
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    ErrorCode::InvalidRequestParameters,
                    "Event bundle has an event with invalid eventId",
                )
                .with_description(format!("Event index (count starts from 0): {}", index)),
            ));
        }

        let count = events.len();
        for (index, event) in events.into_iter().enumerate() {
            if let Err(err) = self.store.put(event) {
                error!(
                    method = "process_upload",
                    error = %ErrorKind::Fatal,
                    request_id = %request_id,
                    index,
                    cause = %err,
                    "Error storing event, aborting"
                );
                return Err(Rejection::new(
                    ErrorKind::Fatal,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::FatalOperation, "Error storing events, aborting"),
                ));
            }
        }

        info!(
            method = "process_upload",
            request_id = %request_id,
            device_type = %device_type,
            count,
            stored = self.store.len(),
            "Request successfully processed"
        );
        Ok(())
    }

    /// Look up a single event by id
    pub fn process_retrieve(&self, event_id: &str) -> Result<ClientEventData, Rejection> {
        self.store.get(event_id).map_err(|err| match err {
            StoreError::RecordNotFound(_) => {
                info!(
                    method = "process_retrieve",
                    id = %event_id,
                    error = %err.kind(),
                    "Record not found"
                );
                Rejection::empty(ErrorKind::RecordNotFound, StatusCode::NOT_FOUND)
            }
            StoreError::InvalidParameters => {
                warn!(
                    method = "process_retrieve",
                    error = %err.kind(),
                    "Invalid id passed through router"
                );
                Rejection::empty(ErrorKind::InvalidParameters, StatusCode::INTERNAL_SERVER_ERROR)
            }
            StoreError::Backend(_) => {
                error!(
                    method = "process_retrieve",
                    id = %event_id,
                    error = %err.kind(),
                    cause = %err,
                    "Error reading event"
                );
                Rejection::empty(ErrorKind::Fatal, StatusCode::INTERNAL_SERVER_ERROR)
            }
        })
    }
}
