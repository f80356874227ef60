//! Session store port.
//!
//! An explicit keyed store (call id to session) owned by the external
//! layer and passed into the application handler, never ambient global
//! state. Each call id is routed to one logical worker at a time, so
//! implementations need no cross-session coordination.

use async_trait::async_trait;

use crate::domain::call::CallSession;
use crate::domain::foundation::{CallId, DomainError};

/// Keyed store for in-progress call sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Finds the session for a call, if one exists.
    ///
    /// # Errors
    ///
    /// - `StoreError` on storage failure
    async fn find(&self, call_id: &CallId) -> Result<Option<CallSession>, DomainError>;

    /// Saves a session, inserting or replacing by call id.
    ///
    /// # Errors
    ///
    /// - `StoreError` on storage failure
    async fn save(&self, session: &CallSession) -> Result<(), DomainError>;

    /// Removes the session for a call once it is terminal and the call
    /// has ended. Removing an absent session is not an error.
    ///
    /// # Errors
    ///
    /// - `StoreError` on storage failure
    async fn remove(&self, call_id: &CallId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_s: &dyn SessionStore) {}
    }
}
