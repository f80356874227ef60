//! Command handlers for the call intake application.

mod call_turn;

pub use call_turn::{CallTurnHandler, TurnOutcome};
