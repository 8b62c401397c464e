//! Wire formats and media type negotiation
//!
//! Requests and responses are encoded in one of two formats:
//! - `application/json` - structured JSON, camelCase field names
//! - `application/x-protobuf` - compact protobuf binary
//!
//! [`WireFormat`] is selected from the `Content-Type` header for uploads and
//! from the `Accept` header for retrievals; `None` means the header named a
//! media type this service does not speak.

mod json;
mod protobuf;

pub use json::JsonCodec;
pub use protobuf::ProtobufCodec;

use crate::error::CodecResult;
use crate::types::{ClientEventData, ClientEventUploadRequest};

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_PROTOBUF: &str = "application/x-protobuf";
pub const APPLICATION_ALL: &str = "*/*";

/// Encode/decode capability for one wire format
pub trait EventCodec: Send + Sync {
    /// Media type written to `Content-Type` for encoded bodies
    fn media_type(&self) -> &'static str;

    /// Client-facing message when a request body cannot be decoded
    fn malformed_message(&self) -> &'static str;

    /// Decode an upload bundle from a request body
    fn decode_bundle(&self, body: &[u8]) -> CodecResult<ClientEventUploadRequest>;

    /// Encode a single stored record for a retrieval response
    fn encode_record(&self, event: &ClientEventData) -> CodecResult<Vec<u8>>;
}

/// Closed set of supported wire formats.
///
/// Header matching is looser than an exact string comparison: parameters
/// such as `; charset=utf-8` are ignored, case does not matter, and `Accept`
/// may list several media ranges. A client sending
/// `application/json; charset=utf-8` is served instead of getting 415.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    Json,
    Protobuf,
}

impl WireFormat {
    /// Codec implementing this format
    pub fn codec(self) -> &'static dyn EventCodec {
        match self {
            WireFormat::Json => &JsonCodec,
            WireFormat::Protobuf => &ProtobufCodec,
        }
    }

    pub fn media_type(self) -> &'static str {
        self.codec().media_type()
    }

    /// Format of an upload body, from its `Content-Type` header.
    ///
    /// An absent header is unsupported.
    pub fn from_content_type(header: Option<&str>) -> Option<Self> {
        match essence(header?).as_str() {
            APPLICATION_JSON => Some(WireFormat::Json),
            APPLICATION_PROTOBUF => Some(WireFormat::Protobuf),
            _ => None,
        }
    }

    /// Format of a retrieval response, from the request's `Accept` header.
    ///
    /// An absent or blank header, and `*/*`, select JSON. When several media
    /// ranges are listed the first supported one wins.
    pub fn from_accept(header: Option<&str>) -> Option<Self> {
        let header = match header.map(str::trim) {
            None | Some("") => return Some(WireFormat::Json),
            Some(header) => header,
        };

        header
            .split(',')
            .map(essence)
            .find_map(|range| match range.as_str() {
                APPLICATION_PROTOBUF => Some(WireFormat::Protobuf),
                APPLICATION_JSON | APPLICATION_ALL => Some(WireFormat::Json),
                _ => None,
            })
    }
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.media_type())
    }
}

/// Media type without parameters, lowercased
fn essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
