//! Scheduler backed by a fixed list of times.
//!
//! Serves slots from a configured list (one human-readable time label
//! per line when loaded from a file), in order, and marks booked slots
//! as taken. Stands in for a real calendar backend in tests and demos.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::call::CallSession;
use crate::domain::foundation::{DomainError, ErrorCode, SlotId, ValidationError};
use crate::domain::scheduling::AppointmentSlot;
use crate::ports::Scheduler;

struct SlotEntry {
    slot: AppointmentSlot,
    taken: bool,
}

/// [`Scheduler`] over a fixed, ordered list of appointment times.
pub struct StaticScheduler {
    entries: Mutex<Vec<SlotEntry>>,
}

impl StaticScheduler {
    /// Creates a scheduler from time labels, earliest first.
    ///
    /// Each label gets a generated slot id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if a label is empty or whitespace
    pub fn from_labels<I, S>(labels: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for label in labels {
            let id = SlotId::new(format!("slot-{}", Uuid::new_v4()))?;
            entries.push(SlotEntry {
                slot: AppointmentSlot::new(id, label.as_ref())?,
                taken: false,
            });
        }
        Ok(Self {
            entries: Mutex::new(entries),
        })
    }

    /// Creates a scheduler from a file with one time label per line.
    /// Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the file cannot be read
    /// - `EmptyField` if a line is empty after trimming (blank lines
    ///   excluded)
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::invalid_format("slots_file", format!("{}: {}", path.display(), e))
        })?;
        Self::from_labels(contents.lines().map(str::trim).filter(|l| !l.is_empty()))
    }

    /// Returns true if the slot with this id has been booked (for test
    /// assertions).
    pub fn is_taken(&self, slot_id: &SlotId) -> bool {
        self.entries
            .lock()
            .expect("StaticScheduler: lock poisoned")
            .iter()
            .any(|e| e.slot.id() == slot_id && e.taken)
    }
}

#[async_trait]
impl Scheduler for StaticScheduler {
    async fn list_slots(&self, limit: usize) -> Result<Vec<AppointmentSlot>, DomainError> {
        Ok(self
            .entries
            .lock()
            .expect("StaticScheduler: lock poisoned")
            .iter()
            .filter(|e| !e.taken)
            .take(limit)
            .map(|e| e.slot.clone())
            .collect())
    }

    async fn book(&self, slot_id: &SlotId, _session: &CallSession) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().expect("StaticScheduler: lock poisoned");
        let entry = entries
            .iter_mut()
            .find(|e| e.slot.id() == slot_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SlotNotFound, format!("unknown slot {}", slot_id))
            })?;
        if entry.taken {
            return Err(DomainError::new(
                ErrorCode::SlotTaken,
                format!("slot {} is already booked", slot_id),
            ));
        }
        entry.taken = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CallId;

    fn scheduler() -> StaticScheduler {
        StaticScheduler::from_labels([
            "Monday at 9:00 AM",
            "Tuesday at 10:00 AM",
            "Friday at 1:30 PM",
        ])
        .unwrap()
    }

    fn session() -> CallSession {
        CallSession::new(CallId::new("CA1").unwrap(), None)
    }

    #[tokio::test]
    async fn lists_slots_in_configured_order() {
        let s = scheduler();
        let slots = s.list_slots(10).await.unwrap();

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].label(), "Monday at 9:00 AM");
        assert_eq!(slots[2].label(), "Friday at 1:30 PM");
    }

    #[tokio::test]
    async fn respects_the_limit() {
        let s = scheduler();
        let slots = s.list_slots(2).await.unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[tokio::test]
    async fn booked_slots_are_not_offered_again() {
        let s = scheduler();
        let slots = s.list_slots(10).await.unwrap();

        s.book(slots[0].id(), &session()).await.unwrap();

        let remaining = s.list_slots(10).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].label(), "Tuesday at 10:00 AM");
        assert!(s.is_taken(slots[0].id()));
    }

    #[tokio::test]
    async fn double_booking_is_rejected() {
        let s = scheduler();
        let slots = s.list_slots(10).await.unwrap();

        s.book(slots[0].id(), &session()).await.unwrap();
        let err = s.book(slots[0].id(), &session()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SlotTaken);
    }

    #[tokio::test]
    async fn booking_unknown_slot_is_rejected() {
        let s = scheduler();
        let err = s
            .book(&SlotId::new("slot-nope").unwrap(), &session())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::SlotNotFound);
    }

    #[test]
    fn from_labels_rejects_blank_label() {
        assert!(StaticScheduler::from_labels(["  "]).is_err());
    }
}
