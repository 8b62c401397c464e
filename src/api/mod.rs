//! API module for HTTP endpoints
//!
//! - `GET /heartbeat` - Liveness check
//! - `POST /v1/events` - Upload an event bundle (JSON or protobuf)
//! - `GET /v1/events/:id` - Retrieve one event (JSON or protobuf)
//! - anything else - 404 with a JSON error body

pub mod handlers;
pub mod http;
pub mod state;

pub use handlers::NumericEventId;
pub use http::create_router;
pub use state::AppState;
