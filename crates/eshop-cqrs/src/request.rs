//! Requests, handlers and their type-erased forms.

use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult};
use std::any::Any;
use std::fmt::{self, Debug};

/// Whether a request reads or mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Query,
    Command,
}

impl RequestKind {
    /// Returns the lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Command => "command",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable request value tagged with the response it produces.
pub trait Request: Debug + Send + Sync + 'static {
    /// Response produced by the handler.
    type Response: Debug + Send + 'static;

    /// Query or command.
    const KIND: RequestKind;
}

/// Business logic for exactly one request type.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    /// Handles the request. `cancel` must be passed on to every I/O call.
    async fn handle(&self, request: R, cancel: &CancellationToken) -> EshopResult<R::Response>;
}

/// A request with its concrete type erased, as seen by pipeline behaviors.
pub trait ErasedRequest: Debug + Send + Sync {
    /// Borrows the concrete request.
    fn as_any(&self) -> &dyn Any;

    /// Recovers ownership of the concrete request.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<R: Request> ErasedRequest for R {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// A handler response with its concrete type erased.
pub trait ErasedResponse: Debug + Send {
    /// Recovers ownership of the concrete response.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: Debug + Send + 'static> ErasedResponse for T {
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Owned, type-erased request.
pub type BoxedRequest = Box<dyn ErasedRequest>;

/// Owned, type-erased response.
pub type BoxedResponse = Box<dyn ErasedResponse>;
