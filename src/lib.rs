//! Meowtrics Server
//!
//! A small HTTP service that ingests client telemetry events encoded as JSON
//! or protobuf, keeps them in memory keyed by event id, and serves them back
//! in either format.
//!
//! # Features
//!
//! - **Two wire formats**: `application/json` and `application/x-protobuf`,
//!   negotiated from `Content-Type` on upload and `Accept` on retrieval
//! - **All-or-nothing validation**: a bundle with any event lacking an id is
//!   rejected before anything is stored
//! - **Thread-Safe**: the event store is guarded by a read/write lock
//! - **Structured errors**: every failure maps to a status code and a JSON
//!   error body with a stable code
//!
//! # Modules
//!
//! - `types`: Wire model (events, bundles, error and heartbeat bodies)
//! - `codec`: JSON and protobuf codecs plus media type negotiation
//! - `event_store`: Storage seam and the in-memory engine
//! - `processor`: Validation, storage and outcome mapping
//! - `api`: Axum router and request handlers
//! - `config`: Environment configuration
//! - `error`: Error kinds and typed errors
//! - `utils`: Timestamps and logger setup
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use meowtrics::{create_router, AppState, MemoryEventStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let state = Arc::new(AppState::new(Arc::new(MemoryEventStore::new())));
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3003").await?;
//!     axum::serve(listener, create_router(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod event_store;
pub mod processor;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use codec::{EventCodec, WireFormat, APPLICATION_ALL, APPLICATION_JSON, APPLICATION_PROTOBUF};
pub use config::AppConfig;
pub use error::{ErrorKind, StoreError};
pub use event_store::{EventStore, MemoryEventStore};
pub use processor::{EventProcessor, Rejection};
pub use types::{
    ClientEventData, ClientEventType, ClientEventUploadRequest, ErrorCode, ErrorResponse,
    HeartBeat,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
