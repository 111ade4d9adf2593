//! Validation utilities.

use crate::EshopError;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// A single rule violation produced while validating a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// Path of the offending field, e.g. `cart.items[0].quantity`.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationViolation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Runs the derived rules and returns the flattened violations.
    fn violations(&self) -> Vec<ValidationViolation> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_errors_to_violations(&errors),
        }
    }

    /// Validates the struct and returns an `EshopError` on failure.
    fn validate_request(&self) -> Result<(), EshopError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(EshopError::ValidationFailed(violations))
        }
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors`, including nested structs and lists,
/// into a list of violations sorted by field path.
#[must_use]
pub fn validation_errors_to_violations(errors: &ValidationErrors) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    collect_violations(errors, None, &mut violations);
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

fn collect_violations(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    out: &mut Vec<ValidationViolation>,
) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    ValidationViolation::new(path.clone(), message)
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_violations(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_violations(nested, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

/// Common validation functions.
pub mod rules {
    use rust_decimal::Decimal;
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a monetary amount is not negative.
    pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::new("negative_amount"));
        }
        Ok(())
    }
}
