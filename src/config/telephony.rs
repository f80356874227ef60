//! Telephony provider configuration.
//!
//! Credentials for the provider that delivers call events and sends
//! post-call texts. The auth token is wrapped in `SecretString` so it
//! never appears in debug output or logs.

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Telephony provider configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelephonyConfig {
    /// Provider account identifier
    pub account_sid: Option<String>,

    /// Provider auth token (secret)
    pub auth_token: Option<SecretString>,

    /// Number post-call texts are sent from, E.164 format
    pub outbound_caller_number: Option<String>,
}

impl TelephonyConfig {
    /// Validate telephony configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.account_sid.as_ref().map_or(true, |s| s.is_empty()) {
            return Err(ValidationError::MissingRequired("TELEPHONY__ACCOUNT_SID"));
        }
        if self.auth_token.is_none() {
            return Err(ValidationError::MissingRequired("TELEPHONY__AUTH_TOKEN"));
        }
        match &self.outbound_caller_number {
            None => {
                return Err(ValidationError::MissingRequired(
                    "TELEPHONY__OUTBOUND_CALLER_NUMBER",
                ))
            }
            Some(number) if !number.starts_with('+') => {
                return Err(ValidationError::InvalidCallerNumber)
            }
            Some(_) => {}
        }
        Ok(())
    }
}
