//! Processed event store port.
//!
//! Telephony webhooks may be delivered more than once. The application
//! layer records every event id it has handled and drops duplicates
//! before the session machine ever sees them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventId};

/// Dedup store for provider event ids.
#[async_trait]
pub trait ProcessedEventStore: Send + Sync {
    /// Marks an event as processed.
    ///
    /// Returns `true` if the event was new, `false` if it had already
    /// been recorded (a duplicate delivery).
    ///
    /// # Errors
    ///
    /// - `StoreError` on storage failure
    async fn mark_processed(&self, event_id: &EventId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn processed_event_store_is_object_safe() {
        fn _accepts_dyn(_s: &dyn ProcessedEventStore) {}
    }
}
