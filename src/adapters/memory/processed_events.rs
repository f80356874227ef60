//! In-memory processed event store.
//!
//! Tracks seen provider event ids in a `HashSet`. Production deployments
//! with multiple instances need a shared store with expiry instead.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, EventId};
use crate::ports::ProcessedEventStore;

/// In-memory [`ProcessedEventStore`].
#[derive(Default)]
pub struct InMemoryProcessedEvents {
    seen: RwLock<HashSet<EventId>>,
}

impl InMemoryProcessedEvents {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProcessedEventStore for InMemoryProcessedEvents {
    async fn mark_processed(&self, event_id: &EventId) -> Result<bool, DomainError> {
        Ok(self
            .seen
            .write()
            .expect("InMemoryProcessedEvents: lock poisoned")
            .insert(event_id.clone()))
    }
}
