//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Field plan is empty")]
    EmptyFieldPlan,

    #[error("Invalid field plan: {0}")]
    InvalidFieldPlan(String),

    #[error("Retry limit must be at least 1")]
    InvalidRetryLimit,

    #[error("Slot offer count must be between 1 and 26")]
    InvalidSlotOfferCount,

    #[error("Outbound caller number must start with '+'")]
    InvalidCallerNumber,
}
