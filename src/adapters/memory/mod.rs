//! In-memory adapters for tests and single-process deployments.

mod processed_events;
mod session_store;

pub use processed_events::InMemoryProcessedEvents;
pub use session_store::InMemorySessionStore;
