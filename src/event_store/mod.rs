//! Event Store Module
//!
//! The store maps an event id to the last event record written under it.
//! - `EventStore`: the storage seam consumed by the request processor
//! - `MemoryEventStore`: process-lifetime in-memory engine
//!
//! # Semantics
//!
//! ```text
//! put(event)  ── empty id ──► InvalidParameters
//!             └─ otherwise ─► insert, overwriting any record with the same id
//!
//! get(id)     ── empty id ──► InvalidParameters
//!             ├─ absent ────► RecordNotFound
//!             └─ present ───► owned copy of the stored record
//! ```
//!
//! No TTL, no capacity bound, nothing survives a restart.

mod memory;

pub use memory::MemoryEventStore;

use crate::error::StoreResult;
use crate::types::ClientEventData;

/// Storage engine for client events, shared across request handlers
pub trait EventStore: Send + Sync {
    /// Insert or overwrite the record keyed by `event.event_id`
    fn put(&self, event: ClientEventData) -> StoreResult<()>;

    /// Return a copy of the record stored under `event_id`
    fn get(&self, event_id: &str) -> StoreResult<ClientEventData>;

    /// Number of stored records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
