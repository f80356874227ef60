//! Field validator port.
//!
//! One validator per required healthcare field, each a pure function
//! from caller text to a normalized value or a rejection. Validators are
//! resolved into a registry once at configuration load; the machine
//! never does runtime type inspection to pick one.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::ValidationError;
use crate::domain::intake::{FieldName, FieldPlan};

/// Pure validation capability for one field.
///
/// Implementations must be deterministic and perform no I/O; the session
/// machine calls them synchronously.
pub trait FieldValidator: Send + Sync {
    /// Validates caller input, returning the normalized value to store.
    ///
    /// # Errors
    ///
    /// - `ValidationError` describing why the input was rejected; the
    ///   machine maps this into the field's retry policy
    fn validate(&self, input: &str) -> Result<String, ValidationError>;
}

/// Mapping from field name to validator, resolved at configuration load.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<FieldName, Arc<dyn FieldValidator>>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a validator for a field, replacing any existing one.
    pub fn register(&mut self, field: FieldName, validator: Arc<dyn FieldValidator>) {
        self.validators.insert(field, validator);
    }

    /// Returns the validator for a field, if registered.
    pub fn get(&self, field: &FieldName) -> Option<&Arc<dyn FieldValidator>> {
        self.validators.get(field)
    }

    /// Verifies that every field in the plan has a validator.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` naming the first uncovered field
    pub fn ensure_covers(&self, plan: &FieldPlan) -> Result<(), ValidationError> {
        for spec in plan.iter() {
            if !self.validators.contains_key(spec.name()) {
                return Err(ValidationError::invalid_format(
                    "validators",
                    format!("no validator registered for field '{}'", spec.name()),
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.validators.keys().map(FieldName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ValidatorRegistry")
            .field("fields", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::FieldSpec;

    struct AcceptAll;

    impl FieldValidator for AcceptAll {
        fn validate(&self, input: &str) -> Result<String, ValidationError> {
            Ok(input.trim().to_string())
        }
    }

    fn field(name: &str) -> FieldName {
        FieldName::new(name).unwrap()
    }

    fn plan(names: &[&str]) -> FieldPlan {
        let specs = names
            .iter()
            .map(|n| {
                FieldSpec::new(
                    field(n),
                    format!("Please tell me your {}.", n),
                    "I heard {value}. Correct?",
                )
                .unwrap()
            })
            .collect();
        FieldPlan::new(specs).unwrap()
    }

    #[test]
    fn registered_validator_is_retrievable() {
        let mut registry = ValidatorRegistry::new();
        registry.register(field("symptoms"), Arc::new(AcceptAll));

        let validator = registry.get(&field("symptoms")).unwrap();
        assert_eq!(validator.validate("  cough  ").unwrap(), "cough");
    }

    #[test]
    fn ensure_covers_passes_when_all_fields_registered() {
        let mut registry = ValidatorRegistry::new();
        registry.register(field("a"), Arc::new(AcceptAll));
        registry.register(field("b"), Arc::new(AcceptAll));

        assert!(registry.ensure_covers(&plan(&["a", "b"])).is_ok());
    }

    #[test]
    fn ensure_covers_names_the_missing_field() {
        let mut registry = ValidatorRegistry::new();
        registry.register(field("a"), Arc::new(AcceptAll));

        let err = registry.ensure_covers(&plan(&["a", "b"])).unwrap_err();
        assert!(format!("{}", err).contains("'b'"));
    }

    #[test]
    fn validator_is_object_safe() {
        fn _accepts_dyn(_v: &dyn FieldValidator) {}
    }
}
