//! Data types for the Meowtrics server
//!
//! This module contains the wire model shared by both encodings and the
//! response bodies written by the HTTP layer.

mod event;
mod response;

pub use event::{ClientEventData, ClientEventType, ClientEventUploadRequest};
pub use response::{ErrorCode, ErrorResponse, HeartBeat};
