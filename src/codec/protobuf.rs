//! Protobuf wire format
//!
//! Field tags match the JSON field order: `ClientEventData` uses 1..4,
//! `ClientEventUploadRequest` uses 1..3.

use prost::Message;

use super::{EventCodec, APPLICATION_PROTOBUF};
use crate::error::CodecResult;
use crate::types::{ClientEventData, ClientEventUploadRequest};

/// prost backed codec
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtobufCodec;

impl EventCodec for ProtobufCodec {
    fn media_type(&self) -> &'static str {
        APPLICATION_PROTOBUF
    }

    fn malformed_message(&self) -> &'static str {
        "Request body contains malformed buffered data"
    }

    fn decode_bundle(&self, body: &[u8]) -> CodecResult<ClientEventUploadRequest> {
        Ok(ClientEventUploadRequest::decode(body)?)
    }

    fn encode_record(&self, event: &ClientEventData) -> CodecResult<Vec<u8>> {
        Ok(event.encode_to_vec())
    }
}
