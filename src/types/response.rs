//! Response bodies written by the HTTP layer

use serde::{Deserialize, Serialize};

/// Machine-readable error codes returned in [`ErrorResponse::code`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    InvalidRequestParameters,
    MalformedRequest,
    RequestedRecordNotFound,
    FatalOperation,
    UnsupportedMediaType,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidRequestParameters => "INVALID_REQUEST_PARAMETERS",
            ErrorCode::MalformedRequest => "MALFORMED_REQUEST",
            ErrorCode::RequestedRecordNotFound => "REQUESTED_RECORD_NOT_FOUND",
            ErrorCode::FatalOperation => "FATAL_OPERATION",
            ErrorCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error body, always encoded as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Body of the catch-all route
    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound, "Nothing to see here")
    }
}

/// Body of `GET /heartbeat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartBeat {
    pub status: String,
    pub timestamp: String,
}

impl HeartBeat {
    pub fn ok(timestamp: String) -> Self {
        Self {
            status: "OK".to_string(),
            timestamp,
        }
    }
}
