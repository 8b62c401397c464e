//! JSON wire format

use super::{EventCodec, APPLICATION_JSON};
use crate::error::CodecResult;
use crate::types::{ClientEventData, ClientEventUploadRequest};

/// serde_json backed codec
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl EventCodec for JsonCodec {
    fn media_type(&self) -> &'static str {
        APPLICATION_JSON
    }

    fn malformed_message(&self) -> &'static str {
        "Request body contains malformed JSON"
    }

    fn decode_bundle(&self, body: &[u8]) -> CodecResult<ClientEventUploadRequest> {
        Ok(serde_json::from_slice(body)?)
    }

    fn encode_record(&self, event: &ClientEventData) -> CodecResult<Vec<u8>> {
        Ok(serde_json::to_vec(event)?)
    }
}
