//! Application layer - handlers orchestrating domain operations.
//!
//! This layer sits between the telephony webhook adapter and the pure
//! session machine: it deduplicates event deliveries, loads and saves
//! sessions, and executes the side effects each turn requests.

pub mod handlers;

pub use handlers::{CallTurnHandler, TurnOutcome};
