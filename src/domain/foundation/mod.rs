//! Foundation types shared across the domain layer.
//!
//! Value objects (identifiers, timestamps), error types, and the
//! state machine trait implemented by lifecycle enums.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CallId, EventId, SlotId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
