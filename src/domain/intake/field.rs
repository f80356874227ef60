//! Field name and specification value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum length for a field name.
pub const MAX_FIELD_NAME_LENGTH: usize = 64;

/// Placeholder substituted with the collected value when rendering a
/// confirmation prompt.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Identifier for one piece of healthcare data (e.g. `date_of_birth`).
///
/// Names are trimmed, non-empty, and limited to lowercase ASCII letters,
/// digits, and underscores so they can double as configuration keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a validated field name.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty or whitespace
    /// - `InvalidFormat` if the name is too long or contains characters
    ///   outside `[a-z0-9_]`
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("field_name"));
        }
        if name.len() > MAX_FIELD_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "field_name",
                format!("must be {} characters or less", MAX_FIELD_NAME_LENGTH),
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "field_name",
                "only lowercase letters, digits and underscores are allowed",
            ));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Specification for collecting one field: what to ask, and how to read
/// the collected value back for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: FieldName,
    prompt: String,
    confirm_template: String,
}

impl FieldSpec {
    /// Creates a field specification.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the prompt or confirmation template is empty
    /// - `InvalidFormat` if the confirmation template does not contain
    ///   the `{value}` placeholder
    pub fn new(
        name: FieldName,
        prompt: impl Into<String>,
        confirm_template: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let prompt = prompt.into();
        let confirm_template = confirm_template.into();
        if prompt.trim().is_empty() {
            return Err(ValidationError::empty_field("prompt"));
        }
        if confirm_template.trim().is_empty() {
            return Err(ValidationError::empty_field("confirm_template"));
        }
        if !confirm_template.contains(VALUE_PLACEHOLDER) {
            return Err(ValidationError::invalid_format(
                "confirm_template",
                format!("must contain the {} placeholder", VALUE_PLACEHOLDER),
            ));
        }
        Ok(Self {
            name,
            prompt,
            confirm_template,
        })
    }

    /// Returns the field name.
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// Returns the collection prompt spoken to the caller.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Renders the confirmation prompt for a collected value.
    pub fn render_confirm(&self, value: &str) -> String {
        self.confirm_template.replace(VALUE_PLACEHOLDER, value)
    }
}
