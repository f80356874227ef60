//! Call session state machine graph.
//!
//! States move forward from greeting through field collection to slot
//! confirmation. The only backward edges are explicit negative
//! confirmations: `Confirming(i)` back to `Collecting(i)`, and
//! `ConfirmingSlot` back to `OfferingSlots`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;
use crate::domain::intake::FieldIndex;

/// The lifecycle state of one call session.
///
/// Terminal states are `Completed`, `Abandoned`, and `Failed`; a session
/// in a terminal state accepts no further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    /// Call connected, greeting spoken, waiting for the caller to respond.
    #[default]
    Greeting,

    /// Collecting the field at the given plan index.
    Collecting(FieldIndex),

    /// Reading the collected value back and waiting for yes/no.
    Confirming(FieldIndex),

    /// Offering appointment slots and waiting for a choice.
    OfferingSlots,

    /// Reading the chosen slot back and waiting for yes/no.
    ConfirmingSlot,

    /// Booking confirmed. Terminal.
    Completed,

    /// Caller hung up or exhausted the retry budget. Terminal.
    Abandoned,

    /// Unrecoverable input or collaborator failure. Terminal.
    Failed,
}

impl CallState {
    /// Returns true if caller input is expected in this state.
    pub fn accepts_input(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if the session is waiting on a yes/no answer.
    pub fn is_confirming(&self) -> bool {
        matches!(self, Self::Confirming(_) | Self::ConfirmingSlot)
    }
}

impl StateMachine for CallState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CallState::*;
        // Every non-terminal state may abort to Abandoned (hangup, retry
        // budget) or Failed (collaborator error).
        if !self.is_terminal() && matches!(target, Abandoned | Failed) {
            return true;
        }
        match (self, target) {
            (Greeting, Collecting(i)) => *i == FieldIndex::first(),
            (Collecting(i), Confirming(j)) => i == j,
            // Negative confirmation re-collects the same field
            (Confirming(i), Collecting(j)) if i == j => true,
            // Affirmative confirmation moves to the next field
            (Confirming(i), Collecting(j)) => j.get() == i.get() + 1,
            (Confirming(_), OfferingSlots) => true,
            (OfferingSlots, ConfirmingSlot) => true,
            // Declined slot gets re-offered
            (ConfirmingSlot, OfferingSlots) => true,
            (ConfirmingSlot, Completed) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CallState::*;
        let mut targets = match self {
            Greeting => vec![Collecting(FieldIndex::first())],
            Collecting(i) => vec![Confirming(*i)],
            Confirming(i) => vec![
                Collecting(*i),
                Collecting(FieldIndex::new(i.get() + 1)),
                OfferingSlots,
            ],
            OfferingSlots => vec![ConfirmingSlot],
            ConfirmingSlot => vec![OfferingSlots, Completed],
            Completed | Abandoned | Failed => vec![],
        };
        if !self.is_terminal() {
            targets.push(Abandoned);
            targets.push(Failed);
        }
        targets
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned | Self::Failed)
    }
}
