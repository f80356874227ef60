//! Notification adapters.

mod recording;

pub use recording::{Notification, RecordingNotifier};
