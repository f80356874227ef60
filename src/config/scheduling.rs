//! Scheduling configuration.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::scheduling::MAX_LETTER_OPTIONS;

use super::error::ValidationError;

/// Scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// Maximum number of slots offered to the caller at once
    #[serde(default = "default_slot_offer_count")]
    pub slot_offer_count: usize,

    /// Optional file with one appointment time label per line, used by
    /// the static scheduler adapter
    pub slots_file: Option<PathBuf>,
}

impl SchedulingConfig {
    /// Validate scheduling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.slot_offer_count == 0 || self.slot_offer_count > MAX_LETTER_OPTIONS {
            return Err(ValidationError::InvalidSlotOfferCount);
        }
        Ok(())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            slot_offer_count: default_slot_offer_count(),
            slots_file: None,
        }
    }
}

fn default_slot_offer_count() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SchedulingConfig::default().validate().is_ok());
        assert_eq!(SchedulingConfig::default().slot_offer_count, 3);
    }

    #[test]
    fn zero_offer_count_is_rejected() {
        let config = SchedulingConfig {
            slot_offer_count: 0,
            slots_file: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn offer_count_beyond_letters_is_rejected() {
        let config = SchedulingConfig {
            slot_offer_count: 27,
            slots_file: None,
        };
        assert!(config.validate().is_err());
    }
}
