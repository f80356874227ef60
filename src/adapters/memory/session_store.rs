//! In-memory session store.
//!
//! Keyed map from call id to session, guarded by an `RwLock`. Suitable
//! for tests and single-process deployments; a multi-instance deployment
//! needs a shared store so a call's events can land on any instance.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned. Acceptable here; this
//! adapter holds no state worth recovering after a panic elsewhere.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::call::CallSession;
use crate::domain::foundation::{CallId, DomainError};
use crate::ports::SessionStore;

/// In-memory [`SessionStore`].
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<CallId, CallSession>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions (for test assertions).
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .expect("InMemorySessionStore: lock poisoned")
            .len()
    }

    /// Returns true if no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find(&self, call_id: &CallId) -> Result<Option<CallSession>, DomainError> {
        Ok(self
            .sessions
            .read()
            .expect("InMemorySessionStore: lock poisoned")
            .get(call_id)
            .cloned())
    }

    async fn save(&self, session: &CallSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .expect("InMemorySessionStore: lock poisoned")
            .insert(session.call_id().clone(), session.clone());
        Ok(())
    }

    async fn remove(&self, call_id: &CallId) -> Result<(), DomainError> {
        self.sessions
            .write()
            .expect("InMemorySessionStore: lock poisoned")
            .remove(call_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_id(id: &str) -> CallId {
        CallId::new(id).unwrap()
    }

    #[tokio::test]
    async fn save_and_find_roundtrip() {
        let store = InMemorySessionStore::new();
        let session = CallSession::new(call_id("CA1"), None);

        store.save(&session).await.unwrap();

        let found = store.find(&call_id("CA1")).await.unwrap().unwrap();
        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn find_missing_returns_none() {
        let store = InMemorySessionStore::new();
        assert!(store.find(&call_id("CA9")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_by_call_id() {
        let store = InMemorySessionStore::new();
        let session = CallSession::new(call_id("CA1"), None);
        store.save(&session).await.unwrap();
        store.save(&session).await.unwrap();

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_absence() {
        let store = InMemorySessionStore::new();
        let session = CallSession::new(call_id("CA1"), None);
        store.save(&session).await.unwrap();

        store.remove(&call_id("CA1")).await.unwrap();
        assert!(store.is_empty());

        // Removing again is not an error
        store.remove(&call_id("CA1")).await.unwrap();
    }
}
