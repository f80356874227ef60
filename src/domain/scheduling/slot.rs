//! Appointment slot value object and offer lettering.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{SlotId, ValidationError};

/// Number of distinct letter labels available for slot offers (A through Z).
pub const MAX_LETTER_OPTIONS: usize = 26;

/// Returns the letter used to label the slot at `index` when reading an
/// offer back to the caller (`A` for the first slot, `B` for the second,
/// and so on). Letters keep spoken options easy to tell apart.
pub fn option_letter(index: usize) -> Option<char> {
    (index < MAX_LETTER_OPTIONS).then(|| (b'A' + index as u8) as char)
}

/// One candidate appointment time offered to the caller.
///
/// Immutable once offered within a session. The identifier is opaque and
/// owned by the scheduler; the label is what gets spoken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSlot {
    id: SlotId,
    label: String,
}

impl AppointmentSlot {
    /// Creates a slot from its identifier and spoken label.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the label is empty or whitespace
    pub fn new(id: SlotId, label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(ValidationError::empty_field("label"));
        }
        Ok(Self { id, label })
    }

    /// Returns the slot identifier.
    pub fn id(&self) -> &SlotId {
        &self.id
    }

    /// Returns the human-readable time label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for AppointmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
