//! Intake configuration: the field plan, retry budget, and phrasing.
//!
//! Which fields are required, how many retries a caller gets, and every
//! line of spoken copy are deployment decisions, so they all live here
//! rather than in the domain.

use serde::Deserialize;

use crate::domain::call::Phrasing;
use crate::domain::foundation::ValidationError as DomainValidationError;
use crate::domain::intake::{FieldName, FieldPlan, FieldSpec};

use super::error::ValidationError;

/// Intake configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Maximum retries per field/question before the session is abandoned
    #[serde(default = "default_max_retries")]
    pub max_field_retries: u32,

    /// Ordered fields to collect; empty means the default plan
    #[serde(default)]
    pub fields: Vec<FieldSettings>,

    /// Spoken copy for the non-field prompts
    #[serde(default)]
    pub phrasing: Phrasing,
}

/// One configured field
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSettings {
    /// Field name, e.g. `date_of_birth`
    pub name: String,

    /// Prompt asking for the field
    pub prompt: String,

    /// Confirmation question; `{value}` is replaced with the collected
    /// value. Defaults to a generic readback.
    pub confirm_prompt: Option<String>,
}

impl IntakeConfig {
    /// Resolves the configured fields into a validated domain plan.
    ///
    /// # Errors
    ///
    /// Returns the underlying domain validation error for bad names,
    /// prompts, or duplicate fields.
    pub fn field_plan(&self) -> Result<FieldPlan, DomainValidationError> {
        let settings = if self.fields.is_empty() {
            default_fields()
        } else {
            self.fields.clone()
        };

        let mut specs = Vec::with_capacity(settings.len());
        for field in settings {
            let name = FieldName::new(field.name)?;
            let confirm = field
                .confirm_prompt
                .unwrap_or_else(|| "I heard {value}. Is that correct?".to_string());
            specs.push(FieldSpec::new(name, field.prompt, confirm)?);
        }
        FieldPlan::new(specs)
    }

    /// Validate intake configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_field_retries == 0 {
            return Err(ValidationError::InvalidRetryLimit);
        }
        self.field_plan().map_err(|e| match e {
            DomainValidationError::EmptyField { .. } => ValidationError::EmptyFieldPlan,
            other => ValidationError::InvalidFieldPlan(other.to_string()),
        })?;
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_field_retries: default_max_retries(),
            fields: Vec::new(),
            phrasing: Phrasing::default(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

/// The standard intake plan when none is configured.
fn default_fields() -> Vec<FieldSettings> {
    let plain = |name: &str, prompt: &str| FieldSettings {
        name: name.to_string(),
        prompt: prompt.to_string(),
        confirm_prompt: None,
    };
    vec![
        plain("full_name", "What is your full name?"),
        plain("date_of_birth", "What is your date of birth?"),
        plain("insurance_payer", "What is the name of your insurance payer?"),
        plain("insurance_id", "What is your insurance ID?"),
        plain(
            "referral",
            "Do you have a referral, and if so, which doctor referred you?",
        ),
        plain("reason_for_visit", "What is the reason for your visit?"),
        plain("address", "What is your address?"),
        plain("contact_number", "What is the best phone number to reach you?"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = IntakeConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_plan_has_the_standard_intake_fields_in_order() {
        let plan = IntakeConfig::default().field_plan().unwrap();
        let names: Vec<&str> = plan.iter().map(|s| s.name().as_str()).collect();
        assert_eq!(
            names,
            vec![
                "full_name",
                "date_of_birth",
                "insurance_payer",
                "insurance_id",
                "referral",
                "reason_for_visit",
                "address",
                "contact_number",
            ]
        );
    }

    #[test]
    fn configured_fields_override_the_default_plan() {
        let config = IntakeConfig {
            fields: vec![FieldSettings {
                name: "symptoms".to_string(),
                prompt: "What symptoms are you experiencing?".to_string(),
                confirm_prompt: None,
            }],
            ..IntakeConfig::default()
        };

        let plan = config.field_plan().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(
            plan.get(crate::domain::intake::FieldIndex::first())
                .unwrap()
                .render_confirm("cough"),
            "I heard cough. Is that correct?"
        );
    }

    #[test]
    fn zero_retries_fails_validation() {
        let config = IntakeConfig {
            max_field_retries: 0,
            ..IntakeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRetryLimit)
        ));
    }

    #[test]
    fn bad_field_name_fails_validation() {
        let config = IntakeConfig {
            fields: vec![FieldSettings {
                name: "Date Of Birth".to_string(),
                prompt: "When were you born?".to_string(),
                confirm_prompt: None,
            }],
            ..IntakeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidFieldPlan(_))
        ));
    }
}
