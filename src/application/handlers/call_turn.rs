//! CallTurnHandler - drives one session turn per telephony event.
//!
//! The webhook adapter maps provider deliveries into [`CallEvent`]s and
//! hands them here. The handler owns everything the pure machine cannot:
//! deduplication, loading and saving the session, and executing the
//! effects the machine requests.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::domain::call::{
    CallEvent, CallSession, CallSessionMachine, CallerInput, Effect, Prompt, Turn,
};
use crate::domain::foundation::{CallId, DomainError, ErrorCode};
use crate::ports::{Notifier, ProcessedEventStore, Scheduler, SessionStore};

/// Result of handling one telephony event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Text to speak to the caller on this turn, if any.
    pub prompt: Option<Prompt>,

    /// True once the session reached a terminal state. The webhook layer
    /// should speak the prompt (if any) and then end the call.
    pub session_over: bool,
}

impl TurnOutcome {
    fn silent() -> Self {
        Self {
            prompt: None,
            session_over: false,
        }
    }
}

/// Handler advancing call sessions in response to telephony events.
pub struct CallTurnHandler {
    store: Arc<dyn SessionStore>,
    scheduler: Arc<dyn Scheduler>,
    notifier: Arc<dyn Notifier>,
    processed: Arc<dyn ProcessedEventStore>,
    machine: CallSessionMachine,
}

impl CallTurnHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        scheduler: Arc<dyn Scheduler>,
        notifier: Arc<dyn Notifier>,
        processed: Arc<dyn ProcessedEventStore>,
        machine: CallSessionMachine,
    ) -> Self {
        Self {
            store,
            scheduler,
            notifier,
            processed,
            machine,
        }
    }

    /// Handles one telephony event end to end.
    ///
    /// Duplicate deliveries (same provider event id) are dropped without
    /// touching the session.
    pub async fn handle(&self, event: CallEvent) -> Result<TurnOutcome, DomainError> {
        // 1. Drop duplicate deliveries before the machine sees them
        if !self.processed.mark_processed(event.event_id()).await? {
            tracing::debug!(
                event_id = %event.event_id(),
                call_id = %event.call_id(),
                "duplicate event delivery dropped"
            );
            return Ok(TurnOutcome::silent());
        }

        match event {
            CallEvent::Started {
                call_id,
                from_number,
                ..
            } => self.on_started(call_id, from_number).await,
            CallEvent::SpeechRecognized {
                call_id, transcript, ..
            } => {
                self.on_caller_input(&call_id, CallerInput::Speech(transcript))
                    .await
            }
            CallEvent::DtmfReceived {
                call_id, digits, ..
            } => {
                self.on_caller_input(&call_id, CallerInput::Dtmf(digits))
                    .await
            }
            CallEvent::Ended { call_id, .. } => self.on_ended(&call_id).await,
        }
    }

    async fn on_started(
        &self,
        call_id: CallId,
        from_number: Option<String>,
    ) -> Result<TurnOutcome, DomainError> {
        tracing::info!(call_id = %call_id, "call connected, starting intake session");

        let session = CallSession::new(call_id, from_number);
        self.store.save(&session).await?;

        Ok(TurnOutcome {
            prompt: Some(self.machine.greeting_prompt()),
            session_over: false,
        })
    }

    async fn on_caller_input(
        &self,
        call_id: &CallId,
        input: CallerInput,
    ) -> Result<TurnOutcome, DomainError> {
        let mut session = self.load_session(call_id).await?;

        let turn = self.machine.advance(&mut session, input)?;
        let prompt = self.execute_effects(&mut session, turn).await?;

        self.store.save(&session).await?;

        if session.is_terminal() {
            tracing::info!(
                call_id = %call_id,
                state = ?session.state(),
                fields_collected = session.collected_count(),
                "session reached terminal state"
            );
        }

        Ok(TurnOutcome {
            prompt,
            session_over: session.is_terminal(),
        })
    }

    async fn on_ended(&self, call_id: &CallId) -> Result<TurnOutcome, DomainError> {
        let Some(mut session) = self.store.find(call_id).await? else {
            // Already cleaned up, or a call we never saw start
            return Ok(TurnOutcome::silent());
        };

        if !session.is_terminal() {
            tracing::info!(call_id = %call_id, "caller hung up mid-session");
            let turn = self.machine.advance(&mut session, CallerInput::Hangup)?;
            self.execute_effects(&mut session, turn).await?;
        }

        self.store.remove(call_id).await?;

        Ok(TurnOutcome {
            prompt: None,
            session_over: true,
        })
    }

    /// Executes the effects from one turn, feeding collaborator results
    /// back into the machine where the turn requires it.
    ///
    /// Returns the prompt to speak: the last one produced across the
    /// initial turn and any follow-up turns triggered by effects.
    async fn execute_effects(
        &self,
        session: &mut CallSession,
        turn: Turn,
    ) -> Result<Option<Prompt>, DomainError> {
        let mut prompt = turn.prompt;
        let mut pending: VecDeque<Effect> = turn.effects.into();

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::ListSlots => {
                    let input = match self
                        .scheduler
                        .list_slots(self.machine.slot_offer_count())
                        .await
                    {
                        Ok(slots) => CallerInput::SlotsLoaded(slots),
                        Err(error) => {
                            tracing::warn!(
                                call_id = %session.call_id(),
                                %error,
                                "scheduler failed to list slots"
                            );
                            CallerInput::UpstreamError(error.to_string())
                        }
                    };
                    let next = self.machine.advance(session, input)?;
                    if next.prompt.is_some() {
                        prompt = next.prompt;
                    }
                    pending.extend(next.effects);
                }
                Effect::Book { slot_id } => {
                    if let Err(error) = self.scheduler.book(&slot_id, session).await {
                        tracing::error!(
                            call_id = %session.call_id(),
                            slot_id = %slot_id,
                            %error,
                            "booking failed after caller confirmation"
                        );
                        // The confirmation text would be a lie now; tell
                        // the caller to call back instead.
                        pending.retain(|e| !matches!(e, Effect::NotifyBooked { .. }));
                        self.notify_not_made(session).await;
                    }
                }
                Effect::NotifyBooked { slot_label } => {
                    self.notify_booked(session, &slot_label).await;
                }
                Effect::NotifyAbandoned => {
                    self.notify_not_made(session).await;
                }
            }
        }

        Ok(prompt)
    }

    // Notifications are best effort: a lost text must not fail the turn.

    async fn notify_booked(&self, session: &CallSession, slot_label: &str) {
        let Some(number) = session.caller_number() else {
            tracing::warn!(
                call_id = %session.call_id(),
                "no caller number on record, skipping booking confirmation text"
            );
            return;
        };
        if let Err(error) = self.notifier.booking_confirmed(number, slot_label).await {
            tracing::warn!(
                call_id = %session.call_id(),
                %error,
                "failed to send booking confirmation"
            );
        }
    }

    async fn notify_not_made(&self, session: &CallSession) {
        let Some(number) = session.caller_number() else {
            return;
        };
        if let Err(error) = self.notifier.booking_not_made(number).await {
            tracing::warn!(
                call_id = %session.call_id(),
                %error,
                "failed to send call-back text"
            );
        }
    }

    async fn load_session(&self, call_id: &CallId) -> Result<CallSession, DomainError> {
        self.store.find(call_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("no session for call '{}'", call_id),
            )
        })
    }
}
