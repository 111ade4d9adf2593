//! Per-request-type validators.

use crate::Request;
use eshop_core::{ValidateExt, ValidationViolation};
use std::any::Any;
use std::marker::PhantomData;
use validator::Validate;

/// A set of pure rules for one request type.
///
/// Rules must not perform I/O; they see only the request value.
pub trait Validator<R: Request>: Send + Sync {
    /// Returns every rule violation; empty when the request is valid.
    fn validate(&self, request: &R) -> Vec<ValidationViolation>;
}

/// Validator that runs the request's `#[derive(Validate)]` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DerivedValidator;

impl<R: Request + Validate> Validator<R> for DerivedValidator {
    fn validate(&self, request: &R) -> Vec<ValidationViolation> {
        request.violations()
    }
}

pub(crate) trait ErasedValidator: Send + Sync {
    fn validate(&self, request: &dyn Any) -> Vec<ValidationViolation>;
}

pub(crate) struct ValidatorAdapter<R, V> {
    validator: V,
    _request: PhantomData<fn(&R)>,
}

impl<R, V> ValidatorAdapter<R, V> {
    pub(crate) fn new(validator: V) -> Self {
        Self {
            validator,
            _request: PhantomData,
        }
    }
}

impl<R, V> ErasedValidator for ValidatorAdapter<R, V>
where
    R: Request,
    V: Validator<R>,
{
    fn validate(&self, request: &dyn Any) -> Vec<ValidationViolation> {
        request
            .downcast_ref::<R>()
            .map(|request| self.validator.validate(request))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestKind;
    use eshop_core::validation::rules::not_blank;

    #[derive(Debug, Validate)]
    struct Rename {
        #[validate(custom(function = "not_blank", message = "Name is required"))]
        name: String,
    }

    impl Request for Rename {
        type Response = ();
        const KIND: RequestKind = RequestKind::Command;
    }

    #[test]
    fn test_derived_validator_uses_derive_rules() {
        let validator = DerivedValidator;
        assert!(Validator::<Rename>::validate(&validator, &Rename { name: "x".into() }).is_empty());

        let violations = Validator::<Rename>::validate(&validator, &Rename { name: " ".into() });
        assert_eq!(violations, vec![ValidationViolation::new("name", "Name is required")]);
    }

    #[test]
    fn test_adapter_ignores_other_request_types() {
        let adapter = ValidatorAdapter::<Rename, _>::new(DerivedValidator);
        assert!(adapter.validate(&42_u32).is_empty());
        assert_eq!(adapter.validate(&Rename { name: String::new() }).len(), 1);
    }
}
