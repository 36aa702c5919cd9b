//! Validation error module
//!
//! This module provides the structured failure returned when a candidate
//! record is rejected. A [`ValidationError`] aggregates every field-level
//! [`FieldViolation`] found during a single construction attempt, so callers
//! see all problems at once rather than the first one only.

use std::fmt;
use thiserror::Error;

/// Field of a result record that a violation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The candidate as a whole (e.g. not a JSON object)
    Record,
    /// Benchmark case name
    Test,
    /// Average duration
    Avg,
    /// Duration unit
    Unit,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Record => "record",
            Field::Test => "Test",
            Field::Avg => "Avg",
            Field::Unit => "Unit",
        };
        f.write_str(name)
    }
}

/// Rule a field value failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Field is absent or null
    Missing,
    /// Value cannot be taken as text
    NotText,
    /// Value is not a number and does not parse as one
    NotANumber,
    /// Value is infinite or NaN
    NotFinite,
    /// Value is zero or negative
    NotPositive,
    /// Value is not one of the accepted unit tokens
    UnknownUnit,
    /// Candidate is not an object with named fields
    NotAnObject,
    /// Candidate text is not well-formed JSON
    Malformed,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ViolationKind::Missing => "field required",
            ViolationKind::NotText => "input should be a valid string",
            ViolationKind::NotANumber => "input should be a valid number",
            ViolationKind::NotFinite => "input should be a finite number",
            ViolationKind::NotPositive => "input should be greater than 0",
            ViolationKind::UnknownUnit => "input should be 'sec', 'ms', 'us' or 'ns'",
            ViolationKind::NotAnObject => "input should be an object",
            ViolationKind::Malformed => "input is not valid JSON",
        };
        f.write_str(message)
    }
}

/// A single rule violation on one field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind} (got '{input}')")]
pub struct FieldViolation {
    /// Field the violation refers to
    pub field: Field,
    /// Rule that was violated
    pub kind: ViolationKind,
    /// Textual rendering of the offending input
    pub input: String,
}

impl FieldViolation {
    /// Create a violation for the given field and rule
    pub fn new(field: Field, kind: ViolationKind, input: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            input: input.into(),
        }
    }
}

/// Rejection of a candidate record, carrying every violation found
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Wrap collected violations, or `None` when there are none
    pub fn from_violations(violations: Vec<FieldViolation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self { violations })
    }

    /// Wrap violations already known to be non-empty
    pub(crate) fn from_nonempty(violations: Vec<FieldViolation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// All violations in field order
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always false; a validation error holds at least one violation
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether any violation matches the given field and rule
    pub fn has(&self, field: Field, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }

    /// Whether any violation refers to the given field
    pub fn touches(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Consume the error and return its violations
    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }
}

impl From<FieldViolation> for ValidationError {
    fn from(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

fn render(violations: &[FieldViolation]) -> String {
    let plural = if violations.len() == 1 { "" } else { "s" };
    let details = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "{} validation error{plural} for ResultRecord: {details}",
        violations.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **What is tested:** Construction of a ValidationError from an empty list
    /// **Why it is tested:** A rejection without a reason must not exist
    /// **Test conditions:** Passes an empty and a non-empty violation list
    /// **Expectations:** Empty yields None, non-empty yields the error
    #[test]
    fn test_from_violations_requires_content() {
        assert!(ValidationError::from_violations(Vec::new()).is_none());

        let err = ValidationError::from_violations(vec![FieldViolation::new(
            Field::Avg,
            ViolationKind::NotPositive,
            "0",
        )])
        .unwrap();
        assert_eq!(err.len(), 1);
        assert!(!err.is_empty());
        assert!(err.has(Field::Avg, ViolationKind::NotPositive));
        assert!(!err.touches(Field::Unit));
    }

    /// **What is tested:** Display output of aggregated violations
    /// **Why it is tested:** The message is what CLI users see on rejection
    /// **Test conditions:** Renders an error with one and with two violations
    /// **Expectations:** Count, plural form, fields, rules and inputs all appear
    #[test]
    fn test_display_lists_every_violation() {
        let single: ValidationError =
            FieldViolation::new(Field::Unit, ViolationKind::UnknownUnit, "Day").into();
        assert_eq!(
            single.to_string(),
            "1 validation error for ResultRecord: Unit: input should be 'sec', 'ms', 'us' or 'ns' (got 'Day')"
        );

        let double = ValidationError::from_violations(vec![
            FieldViolation::new(Field::Avg, ViolationKind::NotFinite, "inf"),
            FieldViolation::new(Field::Unit, ViolationKind::UnknownUnit, "MS"),
        ])
        .unwrap();
        let message = double.to_string();
        assert!(message.starts_with("2 validation errors for ResultRecord: "));
        assert!(message.contains("Avg: input should be a finite number (got 'inf')"));
        assert!(message.contains("Unit: input should be 'sec', 'ms', 'us' or 'ns' (got 'MS')"));
    }

    /// **What is tested:** Required trait implementations for the error types
    /// **Why it is tested:** Callers compare, clone and box these errors
    /// **Test conditions:** Exercises Clone, PartialEq and std::error::Error
    /// **Expectations:** All traits are usable
    #[test]
    fn test_error_types_implement_required_traits() {
        let err: ValidationError =
            FieldViolation::new(Field::Test, ViolationKind::NotText, "12").into();
        let _error_trait: &dyn std::error::Error = &err;
        assert_eq!(err.clone(), err);
        assert_eq!(err.into_violations()[0].field, Field::Test);
    }
}
