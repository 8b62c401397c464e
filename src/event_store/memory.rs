//! In-memory event store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::EventStore;
use crate::error::{StoreError, StoreResult};
use crate::types::ClientEventData;

/// Event store backed by a `HashMap` behind a read/write lock.
///
/// Each `put` holds the write lock for the whole insert, so readers never
/// observe a partially written record.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<HashMap<String, ClientEventData>>,
}

impl MemoryEventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for MemoryEventStore {
    fn put(&self, event: ClientEventData) -> StoreResult<()> {
        if !event.has_event_id() {
            return Err(StoreError::InvalidParameters);
        }

        self.events.write().insert(event.event_id.clone(), event);
        Ok(())
    }

    fn get(&self, event_id: &str) -> StoreResult<ClientEventData> {
        if event_id.is_empty() {
            return Err(StoreError::InvalidParameters);
        }

        self.events
            .read()
            .get(event_id)
            .cloned()
            .ok_or_else(|| StoreError::RecordNotFound(event_id.to_string()))
    }

    fn len(&self) -> usize {
        self.events.read().len()
    }
}
