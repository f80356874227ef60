//! Validators for the common intake fields.
//!
//! Each validator is a pure function from caller text to a normalized
//! value; rejection feeds the machine's retry policy.

use chrono::{Datelike, NaiveDate, Utc};

use crate::domain::foundation::ValidationError;
use crate::ports::FieldValidator;

/// Date formats accepted from transcribed speech.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];

/// Earliest plausible date of birth.
const MIN_BIRTH_YEAR: i32 = 1900;

/// Validates a date of birth and normalizes it to `YYYY-MM-DD`.
///
/// Rejects dates in the future and implausibly old ones.
pub struct DateOfBirthValidator;

impl FieldValidator for DateOfBirthValidator {
    fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let trimmed = input.trim();
        let date = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .ok_or_else(|| {
                ValidationError::invalid_format("date_of_birth", "not a recognizable date")
            })?;

        let today = Utc::now().date_naive();
        if date > today {
            return Err(ValidationError::invalid_format(
                "date_of_birth",
                "date is in the future",
            ));
        }
        if date.year() < MIN_BIRTH_YEAR {
            return Err(ValidationError::invalid_format(
                "date_of_birth",
                "year is implausibly old",
            ));
        }
        Ok(date.format("%Y-%m-%d").to_string())
    }
}

/// Validates a North American phone number and normalizes it to
/// `+1XXXXXXXXXX`.
pub struct PhoneNumberValidator;

impl FieldValidator for PhoneNumberValidator {
    fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        let national = match digits.len() {
            10 => digits,
            11 if digits.starts_with('1') => digits[1..].to_string(),
            _ => {
                return Err(ValidationError::invalid_format(
                    "contact_number",
                    "expected a 10-digit phone number",
                ))
            }
        };
        Ok(format!("+1{}", national))
    }
}

/// Accepts any non-empty answer of a minimum length, trimmed.
pub struct FreeTextValidator {
    min_chars: usize,
    field: &'static str,
}

impl FreeTextValidator {
    /// Creates a free-text validator requiring at least `min_chars`
    /// characters after trimming.
    pub fn new(field: &'static str, min_chars: usize) -> Self {
        Self { min_chars, field }
    }
}

impl FieldValidator for FreeTextValidator {
    fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(self.field));
        }
        if trimmed.chars().count() < self.min_chars {
            return Err(ValidationError::invalid_format(
                self.field,
                format!("expected at least {} characters", self.min_chars),
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// Validates an insurance member id: 5 to 20 alphanumeric characters
/// once spaces and dashes are stripped, normalized to uppercase.
pub struct InsuranceIdValidator;

impl FieldValidator for InsuranceIdValidator {
    fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if cleaned.is_empty() {
            return Err(ValidationError::empty_field("insurance_id"));
        }
        if !cleaned.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::invalid_format(
                "insurance_id",
                "only letters and digits are allowed",
            ));
        }
        if cleaned.len() < 5 || cleaned.len() > 20 {
            return Err(ValidationError::out_of_range(
                "insurance_id",
                5,
                20,
                cleaned.len() as i64,
            ));
        }
        Ok(cleaned.to_uppercase())
    }
}
