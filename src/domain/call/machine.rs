//! The call session state machine.
//!
//! `advance` is a pure function of the session and one input: it mutates
//! the session along the state graph and returns the prompt to speak
//! plus any side effects for the external layer to execute. The machine
//! performs no I/O and never retries collaborator failures itself.

use crate::domain::foundation::ValidationError;
use crate::domain::intake::{FieldIndex, FieldPlan, FieldSpec};
use crate::domain::scheduling::{AppointmentSlot, MAX_LETTER_OPTIONS};
use crate::ports::ValidatorRegistry;

use super::{
    Acknowledgement, CallError, CallSession, CallState, CallerInput, Effect, Phrasing, Prompt,
    RetryKey,
};

/// Outcome of one turn: what to speak, and what to do.
///
/// `prompt` is `None` when there is nobody left to speak to (the caller
/// hung up).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub prompt: Option<Prompt>,
    pub effects: Vec<Effect>,
}

impl Turn {
    fn speak(prompt: Prompt) -> Self {
        Self {
            prompt: Some(prompt),
            effects: Vec::new(),
        }
    }

    fn speak_with(prompt: Prompt, effects: Vec<Effect>) -> Self {
        Self {
            prompt: Some(prompt),
            effects,
        }
    }

    fn silent(effects: Vec<Effect>) -> Self {
        Self {
            prompt: None,
            effects,
        }
    }
}

/// Decides the next state and prompt for one in-progress call.
///
/// All business rules the machine applies (field order, prompts, retry
/// budget, slot offer count) are injected at construction from
/// configuration; nothing is hard-coded.
pub struct CallSessionMachine {
    plan: FieldPlan,
    validators: ValidatorRegistry,
    phrasing: Phrasing,
    max_retries: u32,
    slot_offer_count: usize,
}

impl CallSessionMachine {
    /// Creates a machine from resolved configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if a planned field has no validator
    /// - `OutOfRange` if `slot_offer_count` is zero or exceeds the
    ///   number of letter labels
    pub fn new(
        plan: FieldPlan,
        validators: ValidatorRegistry,
        phrasing: Phrasing,
        max_retries: u32,
        slot_offer_count: usize,
    ) -> Result<Self, ValidationError> {
        validators.ensure_covers(&plan)?;
        if slot_offer_count == 0 || slot_offer_count > MAX_LETTER_OPTIONS {
            return Err(ValidationError::out_of_range(
                "slot_offer_count",
                1,
                MAX_LETTER_OPTIONS as i64,
                slot_offer_count as i64,
            ));
        }
        Ok(Self {
            plan,
            validators,
            phrasing,
            max_retries,
            slot_offer_count,
        })
    }

    /// Returns the greeting spoken when a call connects.
    pub fn greeting_prompt(&self) -> Prompt {
        self.phrasing.greeting()
    }

    /// Returns the configured field plan.
    pub fn plan(&self) -> &FieldPlan {
        &self.plan
    }

    /// Returns how many slots are offered to the caller at once.
    pub fn slot_offer_count(&self) -> usize {
        self.slot_offer_count
    }

    /// Advances the session by one input.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the session is already terminal
    /// - `UnexpectedInput` for inputs that make no sense in the current
    ///   state (e.g. `SlotsLoaded` outside `OfferingSlots`)
    /// - `UnknownField` / `MissingValidator` on configuration bugs
    pub fn advance(
        &self,
        session: &mut CallSession,
        input: CallerInput,
    ) -> Result<Turn, CallError> {
        if session.is_terminal() {
            return Err(CallError::InvalidTransition {
                call_id: session.call_id().clone(),
                state: session.state(),
            });
        }

        match input {
            CallerInput::Hangup => {
                session.transition_to(CallState::Abandoned)?;
                Ok(Turn::silent(vec![Effect::NotifyAbandoned]))
            }
            CallerInput::UpstreamError(_) => {
                session.transition_to(CallState::Failed)?;
                Ok(Turn::speak(self.phrasing.failed()))
            }
            CallerInput::SlotsLoaded(slots) => self.on_slots_loaded(session, slots),
            CallerInput::Speech(text) | CallerInput::Dtmf(text) => {
                self.on_utterance(session, &text)
            }
        }
    }

    fn on_utterance(&self, session: &mut CallSession, text: &str) -> Result<Turn, CallError> {
        let text = text.trim();
        match session.state() {
            CallState::Greeting => self.on_greeting(session, text),
            CallState::Collecting(index) => self.on_collecting(session, index, text),
            CallState::Confirming(index) => self.on_confirming(session, index, text),
            CallState::OfferingSlots => self.on_offering(session, text),
            CallState::ConfirmingSlot => self.on_confirming_slot(session, text),
            // Terminal states are rejected before dispatch
            state => Err(CallError::UnexpectedInput {
                state,
                input_kind: "utterance",
            }),
        }
    }

    fn on_greeting(&self, session: &mut CallSession, text: &str) -> Result<Turn, CallError> {
        if text.is_empty() {
            return self.rejected(session, RetryKey::Greeting, self.phrasing.greeting());
        }
        let first = FieldIndex::first();
        let spec = self.field_spec(first)?;
        session.transition_to(CallState::Collecting(first))?;
        Ok(Turn::speak(Prompt::new(spec.prompt())))
    }

    fn on_collecting(
        &self,
        session: &mut CallSession,
        index: FieldIndex,
        text: &str,
    ) -> Result<Turn, CallError> {
        let spec = self.field_spec(index)?;
        let name = spec.name().clone();
        let reprompt = Prompt::new(spec.prompt());

        if text.is_empty() {
            return self.rejected(session, RetryKey::Field(name), reprompt);
        }

        let validator = self
            .validators
            .get(&name)
            .ok_or_else(|| CallError::MissingValidator { field: name.clone() })?;

        match validator.validate(text) {
            Ok(value) => {
                let confirm = Prompt::new(spec.render_confirm(&value));
                session.store_value(name.clone(), value);
                session.reset_retry(&RetryKey::Field(name));
                session.transition_to(CallState::Confirming(index))?;
                Ok(Turn::speak(confirm))
            }
            Err(_) => self.rejected(session, RetryKey::Field(name), reprompt),
        }
    }

    fn on_confirming(
        &self,
        session: &mut CallSession,
        index: FieldIndex,
        text: &str,
    ) -> Result<Turn, CallError> {
        let spec = self.field_spec(index)?;
        let name = spec.name().clone();

        match Acknowledgement::from_utterance(text) {
            Acknowledgement::Affirmative => {
                session.reset_retry(&RetryKey::Confirm(name));
                match self.plan.next(index) {
                    Some(next) => {
                        let next_prompt = Prompt::new(self.field_spec(next)?.prompt());
                        session.transition_to(CallState::Collecting(next))?;
                        Ok(Turn::speak(next_prompt))
                    }
                    None => {
                        session.set_offered_slots(Vec::new());
                        session.transition_to(CallState::OfferingSlots)?;
                        Ok(Turn::speak_with(
                            self.phrasing.slot_wait(),
                            vec![Effect::ListSlots],
                        ))
                    }
                }
            }
            Acknowledgement::Negative => {
                session.clear_value(&name);
                session.transition_to(CallState::Collecting(index))?;
                Ok(Turn::speak(Prompt::new(spec.prompt())))
            }
            Acknowledgement::Ambiguous => {
                let value = session.value_of(&name).unwrap_or_default().to_string();
                let reprompt = Prompt::new(spec.render_confirm(&value));
                self.rejected(session, RetryKey::Confirm(name), reprompt)
            }
        }
    }

    fn on_offering(&self, session: &mut CallSession, text: &str) -> Result<Turn, CallError> {
        if session.offered_slots().is_empty() {
            // Slots not loaded yet; ask the caller to hold and request
            // them again. Not counted against the retry budget.
            return Ok(Turn::speak_with(
                self.phrasing.slot_wait(),
                vec![Effect::ListSlots],
            ));
        }

        match choose_slot(text, session.offered_slots()) {
            Some(slot) => {
                let confirm = self.phrasing.slot_confirm(slot.label());
                let slot_id = slot.id().clone();
                session.choose_slot(slot_id);
                session.reset_retry(&RetryKey::SlotChoice);
                session.transition_to(CallState::ConfirmingSlot)?;
                Ok(Turn::speak(confirm))
            }
            None => {
                let reprompt = self.phrasing.slot_offer(session.offered_slots());
                self.rejected(session, RetryKey::SlotChoice, reprompt)
            }
        }
    }

    fn on_confirming_slot(
        &self,
        session: &mut CallSession,
        text: &str,
    ) -> Result<Turn, CallError> {
        match Acknowledgement::from_utterance(text) {
            Acknowledgement::Affirmative => {
                let slot_id = session
                    .chosen_slot()
                    .cloned()
                    .ok_or(CallError::UnexpectedInput {
                        state: session.state(),
                        input_kind: "confirmation without a chosen slot",
                    })?;
                let label = session
                    .offered_slots()
                    .iter()
                    .find(|s| s.id() == &slot_id)
                    .map(|s| s.label().to_string())
                    .unwrap_or_default();

                session.reset_retry(&RetryKey::SlotConfirm);
                session.transition_to(CallState::Completed)?;
                Ok(Turn::speak_with(
                    self.phrasing.completed(&label),
                    vec![
                        Effect::Book {
                            slot_id: slot_id.clone(),
                        },
                        Effect::NotifyBooked { slot_label: label },
                    ],
                ))
            }
            Acknowledgement::Negative => {
                session.clear_chosen_slot();
                session.transition_to(CallState::OfferingSlots)?;
                Ok(Turn::speak(self.phrasing.slot_offer(session.offered_slots())))
            }
            Acknowledgement::Ambiguous => {
                let label = session
                    .chosen_slot()
                    .and_then(|id| {
                        session
                            .offered_slots()
                            .iter()
                            .find(|s| s.id() == id)
                            .map(|s| s.label().to_string())
                    })
                    .unwrap_or_default();
                let reprompt = self.phrasing.slot_confirm(&label);
                self.rejected(session, RetryKey::SlotConfirm, reprompt)
            }
        }
    }

    fn on_slots_loaded(
        &self,
        session: &mut CallSession,
        slots: Vec<AppointmentSlot>,
    ) -> Result<Turn, CallError> {
        if session.state() != CallState::OfferingSlots {
            return Err(CallError::UnexpectedInput {
                state: session.state(),
                input_kind: "slots_loaded",
            });
        }
        if slots.is_empty() {
            // Scheduler had nothing to offer; treat as a collaborator
            // failure rather than stranding the caller.
            session.transition_to(CallState::Failed)?;
            return Ok(Turn::speak(self.phrasing.failed()));
        }

        let mut offered = slots;
        offered.truncate(self.slot_offer_count);
        let prompt = self.phrasing.slot_offer(&offered);
        session.set_offered_slots(offered);
        Ok(Turn::speak(prompt))
    }

    /// Applies the retry policy for a rejected or unintelligible answer:
    /// repeat the prompt until the budget for that key is spent, then
    /// abandon the session.
    fn rejected(
        &self,
        session: &mut CallSession,
        key: RetryKey,
        reprompt: Prompt,
    ) -> Result<Turn, CallError> {
        if session.retry_count(&key) >= self.max_retries {
            session.transition_to(CallState::Abandoned)?;
            return Ok(Turn::speak_with(
                self.phrasing.abandoned(),
                vec![Effect::NotifyAbandoned],
            ));
        }
        session.bump_retry(&key);
        Ok(Turn::speak(reprompt))
    }

    fn field_spec(&self, index: FieldIndex) -> Result<&FieldSpec, CallError> {
        self.plan
            .get(index)
            .ok_or(CallError::UnknownField { index })
    }
}

/// Resolves a caller's slot choice against the offered list.
///
/// Accepts the option letter (`A`, `b)`), a 1-based number as digits or
/// a small word (`2`, `two`), or the slot identifier itself.
fn choose_slot<'a>(text: &str, offered: &'a [AppointmentSlot]) -> Option<&'a AppointmentSlot> {
    const WORD_NUMBERS: &[&str] = &[
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];

    let lowered = text.to_lowercase();

    // Exact slot id, for transports that post the id back directly
    if let Some(slot) = offered.iter().find(|s| s.id().as_str() == text) {
        return Some(slot);
    }

    for raw in lowered.split_whitespace() {
        let token = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if token.is_empty() {
            continue;
        }
        // Single letter: A = first option
        if token.len() == 1 {
            let c = token.chars().next().unwrap_or(' ');
            if c.is_ascii_lowercase() {
                let index = (c as u8 - b'a') as usize;
                if let Some(slot) = offered.get(index) {
                    return Some(slot);
                }
                continue;
            }
        }
        // 1-based number, as digits or a word
        let number = token
            .parse::<usize>()
            .ok()
            .or_else(|| WORD_NUMBERS.iter().position(|w| *w == token).map(|p| p + 1));
        if let Some(n) = number {
            if n >= 1 {
                if let Some(slot) = offered.get(n - 1) {
                    return Some(slot);
                }
            }
        }
    }
    None
}
