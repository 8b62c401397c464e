//! Error types shared across the store, codecs and request processing

use thiserror::Error;

/// Classification of every failure a request can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or empty required field
    InvalidParameters,
    /// Lookup miss
    RecordNotFound,
    /// Undecodable payload
    MalformedRequest,
    /// Storage failure
    Fatal,
    /// Unrecognized Content-Type or Accept header
    UnsupportedMedia,
}

impl ErrorKind {
    /// Tag written to the `error` log field
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidParameters => "INVALID_REQUEST_PARAMETERS",
            ErrorKind::RecordNotFound => "REQUESTED_RECORD_NOT_FOUND",
            ErrorKind::MalformedRequest => "MALFORMED_REQUEST",
            ErrorKind::Fatal => "FATAL_OPERATION",
            ErrorKind::UnsupportedMedia => "UNSUPPORTED_MEDIA_TYPE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by an [`EventStore`](crate::event_store::EventStore)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid parameters: event id is empty")]
    InvalidParameters,

    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::InvalidParameters => ErrorKind::InvalidParameters,
            StoreError::RecordNotFound(_) => ErrorKind::RecordNotFound,
            StoreError::Backend(_) => ErrorKind::Fatal,
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while converting between wire bytes and event types
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("protobuf decode error: {0}")]
    ProtobufDecode(#[from] prost::DecodeError),
}
