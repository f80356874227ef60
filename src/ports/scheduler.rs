//! Scheduling collaborator port.

use async_trait::async_trait;

use crate::domain::call::CallSession;
use crate::domain::foundation::{DomainError, SlotId};
use crate::domain::scheduling::AppointmentSlot;

/// Port for the external scheduling/calendar backend.
///
/// The core never owns slot data; it only references slot identifiers
/// the scheduler hands out.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Lists candidate appointment slots, ordered by earliest time.
    ///
    /// Returns at most `limit` slots.
    ///
    /// # Errors
    ///
    /// - `SchedulerUnavailable` when the backend cannot be reached
    async fn list_slots(&self, limit: usize) -> Result<Vec<AppointmentSlot>, DomainError>;

    /// Books a slot using the data collected in the session.
    ///
    /// # Errors
    ///
    /// - `SlotNotFound` if the slot id is unknown
    /// - `SlotTaken` if the slot was booked in the meantime
    /// - `SchedulerUnavailable` when the backend cannot be reached
    async fn book(&self, slot_id: &SlotId, session: &CallSession) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn scheduler_is_object_safe() {
        fn _accepts_dyn(_s: &dyn Scheduler) {}
    }
}
