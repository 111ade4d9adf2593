//! JSON body extractor whose rejections render like every other API error.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use eshop_core::{EshopError, ValidationViolation};
use serde::de::DeserializeOwned;

/// Deserializes a JSON body. A malformed or mistyped body is rejected as a
/// `ValidationFailed` error against the `body` field, i.e. a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError(EshopError::ValidationFailed(vec![ValidationViolation::new(
                "body",
                rejection.body_text(),
            )]))
        })?;

        Ok(JsonBody(value))
    }
}
