//! # eShop CQRS
//!
//! Typed request dispatch through an ordered chain of pipeline behaviors.
//!
//! Every operation is a [`Request`] value tagged with its response type and
//! its [`RequestKind`]. The [`Dispatcher`] resolves the handler registered for
//! the request's exact type and runs it inside a fixed behavior chain:
//!
//! ```text
//! LoggingBehavior -> ValidationBehavior -> (extra behaviors) -> handler
//! ```
//!
//! Handlers never see logging or validation; validators never perform I/O.

pub mod behaviors;
mod dispatcher;
mod pipeline;
mod request;
mod validation;

pub use behaviors::{LoggingBehavior, ValidationBehavior};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use pipeline::{Next, PipelineBehavior, RequestContext};
pub use request::{BoxedRequest, BoxedResponse, ErasedRequest, ErasedResponse, Request, RequestHandler, RequestKind};
pub use validation::{DerivedValidator, Validator};
