//! Default validator wiring.

use std::sync::Arc;

use crate::domain::intake::FieldPlan;
use crate::ports::ValidatorRegistry;

use super::{
    DateOfBirthValidator, FreeTextValidator, InsuranceIdValidator, PhoneNumberValidator,
};

/// Builds a registry covering every field in the plan.
///
/// Fields with a known shape get a specific validator; everything else
/// gets free text. The mapping is by field name, resolved once here
/// rather than inspected at call time.
pub fn build_default_registry(plan: &FieldPlan) -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();
    for spec in plan.iter() {
        let name = spec.name().clone();
        match spec.name().as_str() {
            "date_of_birth" => registry.register(name, Arc::new(DateOfBirthValidator)),
            "contact_number" => registry.register(name, Arc::new(PhoneNumberValidator)),
            "insurance_id" => registry.register(name, Arc::new(InsuranceIdValidator)),
            _ => registry.register(name, Arc::new(FreeTextValidator::new("value", 2))),
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{FieldName, FieldSpec};

    fn plan(names: &[&str]) -> FieldPlan {
        let specs = names
            .iter()
            .map(|n| {
                FieldSpec::new(
                    FieldName::new(*n).unwrap(),
                    format!("Please tell me your {}.", n),
                    "I heard {value}. Correct?",
                )
                .unwrap()
            })
            .collect();
        FieldPlan::new(specs).unwrap()
    }

    #[test]
    fn registry_covers_every_planned_field() {
        let plan = plan(&["full_name", "date_of_birth", "insurance_id", "contact_number"]);
        let registry = build_default_registry(&plan);

        assert!(registry.ensure_covers(&plan).is_ok());
    }

    #[test]
    fn known_fields_get_shape_specific_validators() {
        let plan = plan(&["date_of_birth"]);
        let registry = build_default_registry(&plan);
        let validator = registry
            .get(&FieldName::new("date_of_birth").unwrap())
            .unwrap();

        // A date validator rejects free text a generic validator would accept
        assert!(validator.validate("whenever").is_err());
        assert!(validator.validate("02/28/1990").is_ok());
    }

    #[test]
    fn unknown_fields_fall_back_to_free_text() {
        let plan = plan(&["referral"]);
        let registry = build_default_registry(&plan);
        let validator = registry.get(&FieldName::new("referral").unwrap()).unwrap();

        assert_eq!(validator.validate("Dr. Chen").unwrap(), "Dr. Chen");
    }
}
