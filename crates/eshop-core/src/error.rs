//! Unified error types for all layers of the application.

use crate::ValidationViolation;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of eShop.
///
/// Every failure a request can produce is one of these variants, so the
/// pipeline, the repositories and the HTTP boundary all agree on the same
/// taxonomy and each kind maps to exactly one externally visible status.
#[derive(Error, Debug)]
pub enum EshopError {
    // ============ Domain Errors ============
    /// Aggregate not found
    #[error("Entity \"{resource_type}\" ({key}) was not found")]
    NotFound {
        resource_type: &'static str,
        key: String,
    },

    /// One or more validation rules rejected the request
    #[error("Validation failed: {}", format_violations(.0))]
    ValidationFailed(Vec<ValidationViolation>),

    // ============ Pipeline Errors ============
    /// No handler registered for the request type
    #[error("No handler registered for request type {0}")]
    HandlerNotFound(&'static str),

    /// The caller cancelled the operation
    #[error("Operation was cancelled")]
    Cancelled,

    // ============ Infrastructure Errors ============
    /// Backing document store failure
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Distributed cache failure
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Serialization or deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_violations(violations: &[ValidationViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl EshopError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::ValidationFailed(_) => 400,
            Self::StoreUnavailable(_) | Self::CacheUnavailable(_) => 503,
            // Client closed request
            Self::Cancelled => 499,
            Self::HandlerNotFound(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::HandlerNotFound(_) => "HANDLER_NOT_FOUND",
            Self::Cancelled => "CANCELLED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for an aggregate.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, key: T) -> Self {
        Self::NotFound {
            resource_type,
            key: key.to_string(),
        }
    }

    /// Creates a store unavailable error.
    #[must_use]
    pub fn store_unavailable<T: Into<String>>(message: T) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Creates a cache unavailable error.
    #[must_use]
    pub fn cache_unavailable<T: Into<String>>(message: T) -> Self {
        Self::CacheUnavailable(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the violations carried by a validation failure.
    #[must_use]
    pub fn violations(&self) -> Option<&[ValidationViolation]> {
        match self {
            Self::ValidationFailed(violations) => Some(violations),
            _ => None,
        }
    }

    /// Checks if the failure was caused by the caller rather than the system.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::ValidationFailed(_) | Self::Cancelled
        )
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::CacheUnavailable(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for EshopError {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for EshopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Violations for a rejected request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationViolation>>,
}

impl ErrorResponse {
    /// Creates a new error response from an `EshopError`.
    #[must_use]
    pub fn from_error(error: &EshopError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: error.violations().map(<[ValidationViolation]>::to_vec),
        }
    }

    /// Sets the violation details.
    #[must_use]
    pub fn with_details(mut self, details: Vec<ValidationViolation>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&EshopError> for ErrorResponse {
    fn from(error: &EshopError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(field: &str, message: &str) -> ValidationViolation {
        ValidationViolation::new(field, message)
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(EshopError::not_found("Basket", "alice").status_code(), 404);
        assert_eq!(
            EshopError::ValidationFailed(vec![violation("user_name", "required")]).status_code(),
            400
        );
        assert_eq!(EshopError::store_unavailable("down").status_code(), 503);
        assert_eq!(EshopError::cache_unavailable("down").status_code(), 503);
        assert_eq!(EshopError::HandlerNotFound("Foo").status_code(), 500);
        assert_eq!(EshopError::Cancelled.status_code(), 499);
        assert_eq!(EshopError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EshopError::not_found("Basket", "alice").error_code(), "NOT_FOUND");
        assert_eq!(EshopError::ValidationFailed(vec![]).error_code(), "VALIDATION_FAILED");
        assert_eq!(EshopError::HandlerNotFound("Foo").error_code(), "HANDLER_NOT_FOUND");
        assert_eq!(EshopError::store_unavailable("x").error_code(), "STORE_UNAVAILABLE");
        assert_eq!(EshopError::Cancelled.error_code(), "CANCELLED");
    }

    #[test]
    fn test_not_found_message_names_entity_and_key() {
        let err = EshopError::not_found("Basket", "ghost");
        assert_eq!(err.to_string(), "Entity \"Basket\" (ghost) was not found");
    }

    #[test]
    fn test_validation_message_lists_violations() {
        let err = EshopError::ValidationFailed(vec![
            violation("user_name", "UserName is required"),
            violation("items[0].quantity", "Quantity must be greater than zero"),
        ]);
        let message = err.to_string();
        assert!(message.contains("user_name: UserName is required"));
        assert!(message.contains("items[0].quantity"));
    }

    #[test]
    fn test_client_and_retriable_classification() {
        assert!(EshopError::not_found("Basket", "a").is_client_error());
        assert!(EshopError::ValidationFailed(vec![]).is_client_error());
        assert!(!EshopError::store_unavailable("x").is_client_error());
        assert!(EshopError::store_unavailable("x").is_retriable());
        assert!(!EshopError::not_found("Basket", "a").is_retriable());
    }

    #[test]
    fn test_error_response_carries_violations() {
        let err = EshopError::ValidationFailed(vec![violation("user_name", "required")]);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "VALIDATION_FAILED");
        let details = response.details.expect("details present");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "user_name");
    }

    #[test]
    fn test_error_response_without_details() {
        let response: ErrorResponse = ErrorResponse::from(&EshopError::not_found("Basket", 1));
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.details.is_none());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_serde_error_converts() {
        let err: EshopError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
