//! Field validator adapters.
//!
//! Concrete validators for the common intake fields, plus a helper that
//! wires a default registry for a plan.

mod registry;
mod validators;

pub use registry::build_default_registry;
pub use validators::{
    DateOfBirthValidator, FreeTextValidator, InsuranceIdValidator, PhoneNumberValidator,
};
