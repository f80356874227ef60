//! Intake field definitions.
//!
//! One `FieldSpec` per piece of healthcare data to collect during a call.
//! The ordered, configured list of fields is a `FieldPlan`; the call
//! state machine walks the plan by `FieldIndex`.

mod field;
mod plan;

pub use field::{FieldName, FieldSpec};
pub use plan::{FieldIndex, FieldPlan};
