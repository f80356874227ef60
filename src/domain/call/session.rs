//! Call session aggregate.
//!
//! One `CallSession` per inbound call, created on the provider's call
//! started event and mutated exclusively by the session machine. The
//! external layer persists it between turns and removes it once the
//! session is terminal and the provider has signalled call end.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{CallId, SlotId, StateMachine, Timestamp};
use crate::domain::intake::FieldName;
use crate::domain::scheduling::AppointmentSlot;

use super::{CallError, CallState};

/// What a retry counter is guarding.
///
/// Counters are tracked independently so a caller who struggled with one
/// field still gets the full budget for the next one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RetryKey {
    /// Silence or empty input during the greeting.
    Greeting,
    /// Rejected or empty input while collecting a field.
    Field(FieldName),
    /// Ambiguous answer while confirming a field.
    Confirm(FieldName),
    /// Out-of-range slot choice.
    SlotChoice,
    /// Ambiguous answer while confirming the chosen slot.
    SlotConfirm,
}

impl RetryKey {
    fn storage_key(&self) -> String {
        match self {
            RetryKey::Greeting => "greeting".to_string(),
            RetryKey::Field(name) => format!("field:{}", name),
            RetryKey::Confirm(name) => format!("confirm:{}", name),
            RetryKey::SlotChoice => "slot_choice".to_string(),
            RetryKey::SlotConfirm => "slot_confirm".to_string(),
        }
    }
}

/// Aggregate tracking one phone call from greeting to a terminal state.
///
/// # Invariants
///
/// - `state` only changes along the graph defined by
///   [`CallState`](super::CallState)
/// - a field value is only stored while its `Collecting` state is active
/// - retry counters never exceed the configured maximum (enforced by the
///   machine, which abandons the session first)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSession {
    /// Provider-assigned call identifier.
    call_id: CallId,

    /// Caller's number for out-of-band notifications, when known.
    caller_number: Option<String>,

    /// Current position in the state graph.
    state: CallState,

    /// Validated values collected so far, by field name.
    collected: HashMap<FieldName, String>,

    /// Retry counters, keyed by [`RetryKey`] storage form.
    retries: HashMap<String, u32>,

    /// Slots most recently offered to the caller, in offer order.
    offered_slots: Vec<AppointmentSlot>,

    /// Slot the caller picked, set while confirming and kept on completion.
    chosen_slot: Option<SlotId>,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session last changed.
    updated_at: Timestamp,
}

impl CallSession {
    /// Creates a session for a newly connected call, in `Greeting` state.
    pub fn new(call_id: CallId, caller_number: Option<String>) -> Self {
        let now = Timestamp::now();
        Self {
            call_id,
            caller_number,
            state: CallState::Greeting,
            collected: HashMap::new(),
            retries: HashMap::new(),
            offered_slots: Vec::new(),
            chosen_slot: None,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the call identifier.
    pub fn call_id(&self) -> &CallId {
        &self.call_id
    }

    /// Returns the caller's number, when the provider shared it.
    pub fn caller_number(&self) -> Option<&str> {
        self.caller_number.as_deref()
    }

    /// Returns the current state.
    pub fn state(&self) -> CallState {
        self.state
    }

    /// Returns true if the session reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the collected value for a field, if stored.
    pub fn value_of(&self, field: &FieldName) -> Option<&str> {
        self.collected.get(field).map(String::as_str)
    }

    /// Returns the number of fields collected so far.
    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    /// Returns all collected values.
    pub fn collected(&self) -> &HashMap<FieldName, String> {
        &self.collected
    }

    /// Returns the current retry count for a key.
    pub fn retry_count(&self, key: &RetryKey) -> u32 {
        self.retries.get(&key.storage_key()).copied().unwrap_or(0)
    }

    /// Returns the slots currently offered to the caller.
    pub fn offered_slots(&self) -> &[AppointmentSlot] {
        &self.offered_slots
    }

    /// Returns the chosen slot id, once the caller picked one.
    pub fn chosen_slot(&self) -> Option<&SlotId> {
        self.chosen_slot.as_ref()
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session last changed.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (machine-only)
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves the session to `target`, validating against the state graph.
    pub(crate) fn transition_to(&mut self, target: CallState) -> Result<(), CallError> {
        if !self.state.can_transition_to(&target) {
            return Err(CallError::IllegalStateChange {
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        self.touch();
        Ok(())
    }

    /// Stores the validated value for a field.
    pub(crate) fn store_value(&mut self, field: FieldName, value: String) {
        self.collected.insert(field, value);
        self.touch();
    }

    /// Clears a field's value after a negative confirmation.
    pub(crate) fn clear_value(&mut self, field: &FieldName) {
        self.collected.remove(field);
        self.touch();
    }

    /// Increments a retry counter and returns the new count.
    pub(crate) fn bump_retry(&mut self, key: &RetryKey) -> u32 {
        let count = self.retries.entry(key.storage_key()).or_insert(0);
        *count += 1;
        let count = *count;
        self.touch();
        count
    }

    /// Resets a retry counter after a successful answer.
    pub(crate) fn reset_retry(&mut self, key: &RetryKey) {
        self.retries.remove(&key.storage_key());
        self.touch();
    }

    /// Records the slots just offered to the caller.
    pub(crate) fn set_offered_slots(&mut self, slots: Vec<AppointmentSlot>) {
        self.offered_slots = slots;
        self.touch();
    }

    /// Records the caller's slot choice.
    pub(crate) fn choose_slot(&mut self, slot_id: SlotId) {
        self.chosen_slot = Some(slot_id);
        self.touch();
    }

    /// Clears the slot choice after the caller declined it.
    pub(crate) fn clear_chosen_slot(&mut self) {
        self.chosen_slot = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::FieldIndex;

    fn session() -> CallSession {
        CallSession::new(CallId::new("CA1").unwrap(), Some("+15550100".to_string()))
    }

    fn field(name: &str) -> FieldName {
        FieldName::new(name).unwrap()
    }

    #[test]
    fn new_session_starts_in_greeting() {
        let s = session();
        assert_eq!(s.state(), CallState::Greeting);
        assert!(!s.is_terminal());
        assert_eq!(s.collected_count(), 0);
        assert!(s.chosen_slot().is_none());
    }

    #[test]
    fn valid_transition_updates_state() {
        let mut s = session();
        s.transition_to(CallState::Collecting(FieldIndex::first()))
            .unwrap();
        assert_eq!(s.state(), CallState::Collecting(FieldIndex::first()));
    }

    #[test]
    fn invalid_transition_is_rejected() {
        let mut s = session();
        let result = s.transition_to(CallState::Completed);
        assert!(matches!(result, Err(CallError::IllegalStateChange { .. })));
        assert_eq!(s.state(), CallState::Greeting);
    }

    #[test]
    fn store_and_clear_value() {
        let mut s = session();
        s.store_value(field("date_of_birth"), "1990-02-28".to_string());
        assert_eq!(s.value_of(&field("date_of_birth")), Some("1990-02-28"));

        s.clear_value(&field("date_of_birth"));
        assert_eq!(s.value_of(&field("date_of_birth")), None);
    }

    #[test]
    fn retry_counters_are_independent_per_key() {
        let mut s = session();
        let dob = RetryKey::Field(field("date_of_birth"));
        let symptoms = RetryKey::Field(field("symptoms"));

        assert_eq!(s.bump_retry(&dob), 1);
        assert_eq!(s.bump_retry(&dob), 2);
        assert_eq!(s.retry_count(&dob), 2);
        assert_eq!(s.retry_count(&symptoms), 0);
    }

    #[test]
    fn collect_and_confirm_counters_do_not_collide() {
        let mut s = session();
        let collect = RetryKey::Field(field("symptoms"));
        let confirm = RetryKey::Confirm(field("symptoms"));

        s.bump_retry(&collect);
        assert_eq!(s.retry_count(&confirm), 0);
    }

    #[test]
    fn reset_retry_zeroes_the_counter() {
        let mut s = session();
        let key = RetryKey::SlotChoice;
        s.bump_retry(&key);
        s.bump_retry(&key);
        s.reset_retry(&key);
        assert_eq!(s.retry_count(&key), 0);
    }

    #[test]
    fn chosen_slot_can_be_set_and_cleared() {
        let mut s = session();
        s.choose_slot(SlotId::new("slot-2").unwrap());
        assert_eq!(s.chosen_slot().unwrap().as_str(), "slot-2");

        s.clear_chosen_slot();
        assert!(s.chosen_slot().is_none());
    }

    #[test]
    fn session_roundtrips_through_json() {
        let mut s = session();
        s.store_value(field("full_name"), "Ada Lovelace".to_string());
        s.bump_retry(&RetryKey::Field(field("full_name")));

        let json = serde_json::to_string(&s).unwrap();
        let back: CallSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
