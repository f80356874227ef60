//! Call machine error types.

use thiserror::Error;

use crate::domain::foundation::{CallId, DomainError, ErrorCode};
use crate::domain::intake::{FieldIndex, FieldName};

use super::CallState;

/// Programming errors surfaced by the session machine.
///
/// None of these represent caller mistakes (those are handled by the
/// retry policy); each one indicates the external layer or the
/// configuration broke a contract, and must not be silently ignored.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallError {
    /// Input delivered for a session already in a terminal state.
    #[error("session {call_id} received input in terminal state {state:?}")]
    InvalidTransition { call_id: CallId, state: CallState },

    /// An input kind that makes no sense in the current state, such as
    /// `SlotsLoaded` outside `OfferingSlots`.
    #[error("unexpected {input_kind} input in state {state:?}")]
    UnexpectedInput {
        state: CallState,
        input_kind: &'static str,
    },

    /// The configured plan has no field at the index carried by the state.
    #[error("state references field index {index} beyond the configured plan")]
    UnknownField { index: FieldIndex },

    /// No validator registered for a planned field.
    #[error("no validator configured for field '{field}'")]
    MissingValidator { field: FieldName },

    /// The machine attempted a transition the state graph forbids.
    /// Indicates a bug in the machine itself.
    #[error("illegal state change from {from:?} to {to:?}")]
    IllegalStateChange { from: CallState, to: CallState },
}

impl From<CallError> for DomainError {
    fn from(err: CallError) -> Self {
        let code = match &err {
            CallError::InvalidTransition { .. } => ErrorCode::SessionTerminal,
            CallError::UnexpectedInput { .. } | CallError::IllegalStateChange { .. } => {
                ErrorCode::InvalidStateTransition
            }
            CallError::UnknownField { .. } | CallError::MissingValidator { .. } => {
                ErrorCode::InternalError
            }
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_the_call() {
        let err = CallError::InvalidTransition {
            call_id: CallId::new("CA1").unwrap(),
            state: CallState::Completed,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("CA1"));
        assert!(msg.contains("Completed"));
    }

    #[test]
    fn conversion_maps_terminal_input_to_session_terminal() {
        let err = CallError::InvalidTransition {
            call_id: CallId::new("CA1").unwrap(),
            state: CallState::Abandoned,
        };
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::SessionTerminal);
    }

    #[test]
    fn conversion_maps_config_errors_to_internal() {
        let err = CallError::MissingValidator {
            field: FieldName::new("symptoms").unwrap(),
        };
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::InternalError);
    }
}
