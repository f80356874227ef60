//! Recording notifier for tests.
//!
//! Captures notifications instead of sending them, so tests can assert
//! on what would have been texted to the caller. A production adapter
//! sends SMS through the telephony provider's API.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned. Acceptable for test
//! code; this adapter should not be used in production.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::Notifier;

/// A captured notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    BookingConfirmed { to_number: String, slot_label: String },
    BookingNotMade { to_number: String },
}

/// [`Notifier`] that records messages for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: RwLock<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured notifications.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .read()
            .expect("RecordingNotifier: lock poisoned")
            .clone()
    }

    /// Returns the number of captured notifications.
    pub fn sent_count(&self) -> usize {
        self.sent
            .read()
            .expect("RecordingNotifier: lock poisoned")
            .len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn booking_confirmed(
        &self,
        to_number: &str,
        slot_label: &str,
    ) -> Result<(), DomainError> {
        self.sent
            .write()
            .expect("RecordingNotifier: lock poisoned")
            .push(Notification::BookingConfirmed {
                to_number: to_number.to_string(),
                slot_label: slot_label.to_string(),
            });
        Ok(())
    }

    async fn booking_not_made(&self, to_number: &str) -> Result<(), DomainError> {
        self.sent
            .write()
            .expect("RecordingNotifier: lock poisoned")
            .push(Notification::BookingNotMade {
                to_number: to_number.to_string(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_confirmations_in_order() {
        let notifier = RecordingNotifier::new();

        notifier
            .booking_confirmed("+15550100", "Monday at 9:00 AM")
            .await
            .unwrap();
        notifier.booking_not_made("+15550101").await.unwrap();

        assert_eq!(
            notifier.sent(),
            vec![
                Notification::BookingConfirmed {
                    to_number: "+15550100".to_string(),
                    slot_label: "Monday at 9:00 AM".to_string(),
                },
                Notification::BookingNotMade {
                    to_number: "+15550101".to_string(),
                },
            ]
        );
    }
}
