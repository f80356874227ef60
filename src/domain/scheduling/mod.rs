//! Appointment slot types.
//!
//! Slots are owned by the external scheduling collaborator; the domain
//! only carries their identifier and human-readable label.

mod slot;

pub use slot::{option_letter, AppointmentSlot, MAX_LETTER_OPTIONS};
