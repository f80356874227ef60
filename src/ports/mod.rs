//! Ports: contracts the core consumes but does not implement.
//!
//! Telephony, speech, scheduling, persistence, and notification are all
//! external collaborators behind these traits. Adapters live in
//! `crate::adapters`.

mod field_validator;
mod notifier;
mod processed_event_store;
mod scheduler;
mod session_store;

pub use field_validator::{FieldValidator, ValidatorRegistry};
pub use notifier::Notifier;
pub use processed_event_store::ProcessedEventStore;
pub use scheduler::Scheduler;
pub use session_store::SessionStore;
