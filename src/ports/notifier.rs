//! Notifier port for out-of-band caller messages.
//!
//! After the call, the caller gets a text confirming the booking, or
//! asking them to call back when no booking was made. A concrete
//! adapter would send SMS through the telephony provider.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Port for post-call notifications to the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Confirms a successful booking for the given slot.
    ///
    /// # Errors
    ///
    /// - `NotifierUnavailable` when the message cannot be sent
    async fn booking_confirmed(&self, to_number: &str, slot_label: &str)
        -> Result<(), DomainError>;

    /// Tells the caller no booking was made and they should call back.
    ///
    /// # Errors
    ///
    /// - `NotifierUnavailable` when the message cannot be sent
    async fn booking_not_made(&self, to_number: &str) -> Result<(), DomainError>;
}
