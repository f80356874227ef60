//! Inputs fed into the session machine.
//!
//! Caller speech and DTMF come from the telephony/speech collaborators.
//! `SlotsLoaded`, `UpstreamError`, and `Hangup` are how the external
//! layer feeds collaborator results and call termination back into the
//! pure machine.

use serde::{Deserialize, Serialize};

use crate::domain::scheduling::AppointmentSlot;

/// One input to [`CallSessionMachine::advance`](super::CallSessionMachine::advance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerInput {
    /// Transcribed caller speech.
    Speech(String),

    /// DTMF digits pressed by the caller.
    Dtmf(String),

    /// Result of the `ListSlots` effect, supplied by the external layer.
    SlotsLoaded(Vec<AppointmentSlot>),

    /// A collaborator call failed; the external layer reports it here
    /// (including timeouts it mapped into errors).
    UpstreamError(String),

    /// The provider signalled call termination.
    Hangup,
}

impl CallerInput {
    /// Returns the caller's utterance, if this input carries one.
    pub fn utterance(&self) -> Option<&str> {
        match self {
            CallerInput::Speech(text) | CallerInput::Dtmf(text) => Some(text),
            _ => None,
        }
    }
}

/// Interpretation of a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    Affirmative,
    Negative,
    Ambiguous,
}

impl Acknowledgement {
    /// Classifies an utterance as affirmative, negative, or ambiguous.
    ///
    /// Matching is word-based and case-insensitive; an utterance that
    /// contains both kinds of cue (or neither) is ambiguous. DTMF `1`
    /// means yes and `2` means no.
    pub fn from_utterance(text: &str) -> Self {
        const AFFIRMATIVE: &[&str] = &[
            "yes", "yeah", "yep", "yup", "correct", "right", "sure", "ok", "okay",
            "affirmative", "1",
        ];
        const NEGATIVE: &[&str] = &[
            "no", "nope", "nah", "wrong", "incorrect", "negative", "2",
        ];

        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .map(|w| w.trim_matches('\''))
            .collect();

        let affirmative = words.iter().any(|w| AFFIRMATIVE.contains(w));
        let negative = words.iter().any(|w| NEGATIVE.contains(w));

        match (affirmative, negative) {
            (true, false) => Acknowledgement::Affirmative,
            (false, true) => Acknowledgement::Negative,
            _ => Acknowledgement::Ambiguous,
        }
    }
}
