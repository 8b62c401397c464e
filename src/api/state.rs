//! Shared application state

use std::sync::Arc;

use crate::event_store::EventStore;
use crate::processor::EventProcessor;

/// State shared by every request handler
pub struct AppState {
    pub processor: EventProcessor,
}

impl AppState {
    /// Create state around the given store
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            processor: EventProcessor::new(store),
        }
    }
}
