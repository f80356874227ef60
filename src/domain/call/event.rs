//! Telephony events delivered by the provider.
//!
//! The external webhook layer maps its wire format into these; the
//! application handler maps them onto session machine inputs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CallId, EventId};

/// One delivery from the telephony event source.
///
/// Every event carries the provider's event id (used for delivery
/// deduplication) and the call id it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallEvent {
    /// Inbound call connected.
    Started {
        event_id: EventId,
        call_id: CallId,
        /// Caller's phone number, when the provider shares it. Used for
        /// out-of-band notifications after the call.
        from_number: Option<String>,
    },

    /// The speech collaborator produced a transcript of caller speech.
    SpeechRecognized {
        event_id: EventId,
        call_id: CallId,
        transcript: String,
    },

    /// The caller pressed DTMF digits.
    DtmfReceived {
        event_id: EventId,
        call_id: CallId,
        digits: String,
    },

    /// The call ended.
    Ended { event_id: EventId, call_id: CallId },
}

impl CallEvent {
    /// Returns the provider event id.
    pub fn event_id(&self) -> &EventId {
        match self {
            CallEvent::Started { event_id, .. }
            | CallEvent::SpeechRecognized { event_id, .. }
            | CallEvent::DtmfReceived { event_id, .. }
            | CallEvent::Ended { event_id, .. } => event_id,
        }
    }

    /// Returns the call this event belongs to.
    pub fn call_id(&self) -> &CallId {
        match self {
            CallEvent::Started { call_id, .. }
            | CallEvent::SpeechRecognized { call_id, .. }
            | CallEvent::DtmfReceived { call_id, .. }
            | CallEvent::Ended { call_id, .. } => call_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_work_for_every_variant() {
        let call_id = CallId::new("CA1").unwrap();
        let events = vec![
            CallEvent::Started {
                event_id: EventId::new("EV1").unwrap(),
                call_id: call_id.clone(),
                from_number: Some("+15550100".to_string()),
            },
            CallEvent::SpeechRecognized {
                event_id: EventId::new("EV2").unwrap(),
                call_id: call_id.clone(),
                transcript: "hello".to_string(),
            },
            CallEvent::DtmfReceived {
                event_id: EventId::new("EV3").unwrap(),
                call_id: call_id.clone(),
                digits: "1".to_string(),
            },
            CallEvent::Ended {
                event_id: EventId::new("EV4").unwrap(),
                call_id: call_id.clone(),
            },
        ];

        for event in &events {
            assert_eq!(event.call_id(), &call_id);
        }
        assert_eq!(events[2].event_id().as_str(), "EV3");
    }

    #[test]
    fn events_are_tagged_by_type_in_json() {
        let event = CallEvent::Ended {
            event_id: EventId::new("EV4").unwrap(),
            call_id: CallId::new("CA1").unwrap(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ended\""));
    }
}
