//! Prompts spoken back to the caller.
//!
//! `Prompt` is the text for one turn; `Phrasing` holds the configured
//! templates the machine renders prompts from. All phrasing is
//! configuration, not hard-coded business copy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::scheduling::{option_letter, AppointmentSlot};

/// Placeholder substituted with the chosen slot label.
pub const SLOT_PLACEHOLDER: &str = "{slot}";

/// Text to speak to the caller on the next turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    /// Creates a prompt from rendered text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the prompt text.
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configured phrasing templates for the non-field prompts.
///
/// Templates containing `{slot}` get the chosen slot's label substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phrasing {
    /// Opening line spoken when the call connects.
    pub greeting: String,

    /// Spoken while slots are being fetched from the scheduler.
    pub slot_wait: String,

    /// Asks the caller to pick one of the offered slots. The lettered
    /// options are appended.
    pub slot_offer_lead: String,

    /// Confirmation question for the chosen slot (`{slot}`).
    pub slot_confirm: String,

    /// Closing line once the booking is confirmed (`{slot}`).
    pub completed: String,

    /// Closing line when the session is abandoned.
    pub abandoned: String,

    /// Closing line when a collaborator failure ends the session.
    pub failed: String,
}

impl Phrasing {
    /// Renders the greeting prompt.
    pub fn greeting(&self) -> Prompt {
        Prompt::new(self.greeting.clone())
    }

    /// Renders the please-hold prompt spoken while slots load.
    pub fn slot_wait(&self) -> Prompt {
        Prompt::new(self.slot_wait.clone())
    }

    /// Renders the slot offer with lettered options, e.g.
    /// `... A) Monday at 9:00 AM, B) Tuesday at 10:00 AM, or C) ...?`.
    pub fn slot_offer(&self, slots: &[AppointmentSlot]) -> Prompt {
        let mut text = self.slot_offer_lead.trim_end().to_string();
        text.push(' ');
        for (i, slot) in slots.iter().enumerate() {
            let letter = option_letter(i).unwrap_or('?');
            if i + 1 == slots.len() {
                if slots.len() > 1 {
                    text.push_str("or ");
                }
                text.push_str(&format!("{}) {}?", letter, slot.label()));
            } else {
                text.push_str(&format!("{}) {}, ", letter, slot.label()));
            }
        }
        Prompt::new(text)
    }

    /// Renders the slot confirmation question.
    pub fn slot_confirm(&self, slot_label: &str) -> Prompt {
        Prompt::new(self.slot_confirm.replace(SLOT_PLACEHOLDER, slot_label))
    }

    /// Renders the completed closing line.
    pub fn completed(&self, slot_label: &str) -> Prompt {
        Prompt::new(self.completed.replace(SLOT_PLACEHOLDER, slot_label))
    }

    /// Renders the abandoned closing line.
    pub fn abandoned(&self) -> Prompt {
        Prompt::new(self.abandoned.clone())
    }

    /// Renders the failure closing line.
    pub fn failed(&self) -> Prompt {
        Prompt::new(self.failed.clone())
    }
}

impl Default for Phrasing {
    fn default() -> Self {
        Self {
            greeting: "Hello, and thank you for calling. I'll collect a few details \
                       and help you book an appointment. Are you ready to begin?"
                .to_string(),
            slot_wait: "One moment while I check our available appointment times.".to_string(),
            slot_offer_lead: "Which of these times would you prefer:".to_string(),
            slot_confirm: "You chose {slot}. Shall I book it?".to_string(),
            completed: "Your appointment on {slot} is booked. Thank you, and goodbye."
                .to_string(),
            abandoned: "I wasn't able to complete your booking. Please call back and try \
                        again. Goodbye."
                .to_string(),
            failed: "I'm sorry, something went wrong on our end. Please call back later. \
                     Goodbye."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SlotId;

    fn slot(id: &str, label: &str) -> AppointmentSlot {
        AppointmentSlot::new(SlotId::new(id).unwrap(), label).unwrap()
    }

    #[test]
    fn slot_offer_letters_the_options() {
        let phrasing = Phrasing::default();
        let prompt = phrasing.slot_offer(&[
            slot("s1", "Monday at 9:00 AM"),
            slot("s2", "Tuesday at 10:00 AM"),
            slot("s3", "Friday at 1:30 PM"),
        ]);

        let text = prompt.text();
        assert!(text.contains("A) Monday at 9:00 AM, "));
        assert!(text.contains("B) Tuesday at 10:00 AM, "));
        assert!(text.ends_with("or C) Friday at 1:30 PM?"));
    }

    #[test]
    fn slot_offer_with_single_option_has_no_or() {
        let phrasing = Phrasing::default();
        let prompt = phrasing.slot_offer(&[slot("s1", "Monday at 9:00 AM")]);
        assert!(prompt.text().ends_with("A) Monday at 9:00 AM?"));
        assert!(!prompt.text().contains("or "));
    }

    #[test]
    fn slot_confirm_substitutes_label() {
        let phrasing = Phrasing::default();
        let prompt = phrasing.slot_confirm("Monday at 9:00 AM");
        assert_eq!(prompt.text(), "You chose Monday at 9:00 AM. Shall I book it?");
    }

    #[test]
    fn completed_substitutes_label() {
        let phrasing = Phrasing::default();
        let prompt = phrasing.completed("Friday at 1:30 PM");
        assert!(prompt.text().contains("Friday at 1:30 PM"));
    }
}
