//! Call session domain: state graph, aggregate, and the session machine.

mod effect;
mod errors;
mod event;
mod input;
mod machine;
mod prompt;
mod session;
mod state;

pub use effect::Effect;
pub use errors::CallError;
pub use event::CallEvent;
pub use input::{Acknowledgement, CallerInput};
pub use machine::{CallSessionMachine, Turn};
pub use prompt::{Phrasing, Prompt, SLOT_PLACEHOLDER};
pub use session::{CallSession, RetryKey};
pub use state::CallState;
