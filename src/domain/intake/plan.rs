//! Ordered plan of fields to collect during a call.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::{FieldName, FieldSpec};

/// Position of a field within a [`FieldPlan`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FieldIndex(usize);

impl FieldIndex {
    /// Index of the first field in any plan.
    pub fn first() -> Self {
        Self(0)
    }

    /// Creates an index from a raw position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw position.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FieldIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed, configured order of fields to collect.
///
/// # Invariants
///
/// - At least one field
/// - Field names are unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPlan {
    fields: Vec<FieldSpec>,
}

impl FieldPlan {
    /// Creates a plan from an ordered list of field specifications.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the list is empty
    /// - `InvalidFormat` if two fields share a name
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, ValidationError> {
        if fields.is_empty() {
            return Err(ValidationError::empty_field("fields"));
        }
        let mut seen: HashSet<&FieldName> = HashSet::new();
        for spec in &fields {
            if !seen.insert(spec.name()) {
                return Err(ValidationError::invalid_format(
                    "fields",
                    format!("duplicate field '{}'", spec.name()),
                ));
            }
        }
        Ok(Self { fields })
    }

    /// Returns the number of fields in the plan.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the plan has no fields. Always false for a
    /// constructed plan; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the specification at the given index.
    pub fn get(&self, index: FieldIndex) -> Option<&FieldSpec> {
        self.fields.get(index.get())
    }

    /// Returns the index following `index`, or `None` if `index` is the
    /// last field of the plan.
    pub fn next(&self, index: FieldIndex) -> Option<FieldIndex> {
        let next = index.get() + 1;
        (next < self.fields.len()).then(|| FieldIndex::new(next))
    }

    /// Returns true if `index` addresses the last field.
    pub fn is_last(&self, index: FieldIndex) -> bool {
        index.get() + 1 == self.fields.len()
    }

    /// Iterates over the fields in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> FieldSpec {
        FieldSpec::new(
            FieldName::new(name).unwrap(),
            format!("Please tell me your {}.", name),
            format!("Your {} is {{value}}. Is that correct?", name),
        )
        .unwrap()
    }

    #[test]
    fn plan_preserves_field_order() {
        let plan = FieldPlan::new(vec![spec("full_name"), spec("date_of_birth")]).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(
            plan.get(FieldIndex::first()).unwrap().name().as_str(),
            "full_name"
        );
        assert_eq!(
            plan.get(FieldIndex::new(1)).unwrap().name().as_str(),
            "date_of_birth"
        );
    }

    #[test]
    fn plan_rejects_empty_list() {
        assert!(FieldPlan::new(vec![]).is_err());
    }

    #[test]
    fn plan_rejects_duplicate_names() {
        let result = FieldPlan::new(vec![spec("symptoms"), spec("symptoms")]);
        assert!(result.is_err());
    }

    #[test]
    fn next_walks_forward_and_stops_at_end() {
        let plan = FieldPlan::new(vec![spec("a"), spec("b")]).unwrap();
        let first = FieldIndex::first();
        let second = plan.next(first).unwrap();
        assert_eq!(second, FieldIndex::new(1));
        assert!(plan.next(second).is_none());
    }

    #[test]
    fn is_last_identifies_final_field() {
        let plan = FieldPlan::new(vec![spec("a"), spec("b")]).unwrap();
        assert!(!plan.is_last(FieldIndex::first()));
        assert!(plan.is_last(FieldIndex::new(1)));
    }

    #[test]
    fn get_out_of_bounds_returns_none() {
        let plan = FieldPlan::new(vec![spec("a")]).unwrap();
        assert!(plan.get(FieldIndex::new(5)).is_none());
    }
}
