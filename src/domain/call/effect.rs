//! Side effects requested by the session machine.
//!
//! The machine performs no I/O. It returns effects for the external
//! layer to execute against the scheduler and notifier collaborators.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SlotId;

/// A side effect the external layer must carry out after a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Fetch candidate slots from the scheduler; feed the result back as
    /// [`CallerInput::SlotsLoaded`](super::CallerInput::SlotsLoaded).
    ListSlots,

    /// Book the chosen slot with the scheduler.
    Book { slot_id: SlotId },

    /// Tell the caller (out of band) that the booking succeeded.
    NotifyBooked { slot_label: String },

    /// Tell the caller (out of band) that no booking was made and they
    /// should call back.
    NotifyAbandoned,
}
