//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CALL_INTAKE_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use call_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Offering {} slots per call", config.scheduling.slot_offer_count);
//! ```

mod error;
mod intake;
mod scheduling;
mod telephony;

pub use error::{ConfigError, ValidationError};
pub use intake::{FieldSettings, IntakeConfig};
pub use scheduling::SchedulingConfig;
pub use telephony::TelephonyConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the call intake service.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Intake configuration (field plan, retries, phrasing)
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Scheduling configuration (slot offers, static slot file)
    #[serde(default)]
    pub scheduling: SchedulingConfig,

    /// Telephony provider configuration (credentials, outbound number)
    #[serde(default)]
    pub telephony: TelephonyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CALL_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CALL_INTAKE__INTAKE__MAX_FIELD_RETRIES=3` -> `intake.max_field_retries = 3`
    /// - `CALL_INTAKE__SCHEDULING__SLOT_OFFER_COUNT=3` -> `scheduling.slot_offer_count = 3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CALL_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Field plan shape and retry budget
    /// - Slot offer bounds
    /// - Telephony credentials and caller number format
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.intake.validate()?;
        self.scheduling.validate()?;
        self.telephony.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("CALL_INTAKE__TELEPHONY__ACCOUNT_SID", "AC0000test");
        env::set_var("CALL_INTAKE__TELEPHONY__AUTH_TOKEN", "tok_test");
        env::set_var("CALL_INTAKE__TELEPHONY__OUTBOUND_CALLER_NUMBER", "+15550100");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("CALL_INTAKE__TELEPHONY__ACCOUNT_SID");
        env::remove_var("CALL_INTAKE__TELEPHONY__AUTH_TOKEN");
        env::remove_var("CALL_INTAKE__TELEPHONY__OUTBOUND_CALLER_NUMBER");
        env::remove_var("CALL_INTAKE__INTAKE__MAX_FIELD_RETRIES");
        env::remove_var("CALL_INTAKE__SCHEDULING__SLOT_OFFER_COUNT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.telephony.account_sid.as_deref(), Some("AC0000test"));
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_intake_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.intake.max_field_retries, 3);
        assert_eq!(config.scheduling.slot_offer_count, 3);
        assert_eq!(config.intake.field_plan().unwrap().len(), 8);
    }

    #[test]
    fn test_custom_retry_budget() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CALL_INTAKE__INTAKE__MAX_FIELD_RETRIES", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.intake.max_field_retries, 5);
    }

    #[test]
    fn test_missing_telephony_fails_validation() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }
}
