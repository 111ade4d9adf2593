//! Result type aliases for eShop.

use crate::EshopError;

/// A specialized `Result` type for eShop operations.
pub type EshopResult<T> = Result<T, EshopError>;

/// A boxed future returning an `EshopResult`.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = EshopResult<T>> + Send + 'a>>;
