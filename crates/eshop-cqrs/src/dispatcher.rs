//! Request dispatcher and its builder.

use crate::pipeline::{ErasedHandler, HandlerAdapter};
use crate::validation::{ErasedValidator, ValidatorAdapter};
use crate::{
    BoxedRequest, LoggingBehavior, Next, PipelineBehavior, Request, RequestContext,
    RequestHandler, ValidationBehavior, Validator,
};
use eshop_core::{CancellationToken, EshopError, EshopResult};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Routes requests to their handler through the behavior chain.
///
/// The chain is fixed at build time: [`LoggingBehavior`] outermost, then
/// [`ValidationBehavior`], then any extra behaviors in registration order,
/// then the handler.
pub struct Dispatcher {
    handlers: HashMap<TypeId, Arc<dyn ErasedHandler>>,
    behaviors: Vec<Arc<dyn PipelineBehavior>>,
}

impl Dispatcher {
    /// Starts building a dispatcher.
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Sends a request through the pipeline to its handler.
    ///
    /// Fails with [`EshopError::HandlerNotFound`] when no handler is
    /// registered for `R`.
    pub async fn send<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> EshopResult<R::Response> {
        let handler = self
            .handlers
            .get(&TypeId::of::<R>())
            .ok_or_else(|| EshopError::HandlerNotFound(type_name::<R>()))?;

        let ctx = RequestContext::of::<R>(cancel);
        let next = Next {
            behaviors: &self.behaviors,
            handler: handler.as_ref(),
            ctx: &ctx,
        };

        let boxed: BoxedRequest = Box::new(request);
        let response = next.run(boxed).await?;

        response
            .into_any()
            .downcast::<R::Response>()
            .map(|response| *response)
            .map_err(|_| {
                EshopError::internal(format!(
                    "handler for {} returned an unexpected response type",
                    type_name::<R>()
                ))
            })
    }

    /// Returns true if a handler is registered for `R`.
    #[must_use]
    pub fn has_handler<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }
}

/// Collects handlers, validators and extra behaviors for a [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    handlers: HashMap<TypeId, Arc<dyn ErasedHandler>>,
    validators: HashMap<TypeId, Vec<Arc<dyn ErasedValidator>>>,
    behaviors: Vec<Arc<dyn PipelineBehavior>>,
}

impl DispatcherBuilder {
    /// Registers the handler for `R`, replacing any previous one.
    #[must_use]
    pub fn register_handler<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let previous = self
            .handlers
            .insert(TypeId::of::<R>(), Arc::new(HandlerAdapter::<R, H>::new(handler)));
        if previous.is_some() {
            warn!(request_type = type_name::<R>(), "handler replaced");
        }
        self
    }

    /// Adds a validator for `R`. Several validators may be registered for
    /// the same type; their violations are combined.
    #[must_use]
    pub fn register_validator<R, V>(mut self, validator: V) -> Self
    where
        R: Request,
        V: Validator<R> + 'static,
    {
        self.validators
            .entry(TypeId::of::<R>())
            .or_default()
            .push(Arc::new(ValidatorAdapter::<R, V>::new(validator)));
        self
    }

    /// Appends a behavior that runs inside validation, just around the handler.
    #[must_use]
    pub fn with_behavior<B: PipelineBehavior + 'static>(mut self, behavior: B) -> Self {
        self.behaviors.push(Arc::new(behavior));
        self
    }

    /// Builds the dispatcher with the fixed behavior order.
    #[must_use]
    pub fn build(self) -> Dispatcher {
        let mut behaviors: Vec<Arc<dyn PipelineBehavior>> = vec![
            Arc::new(LoggingBehavior),
            Arc::new(ValidationBehavior::new(self.validators)),
        ];
        behaviors.extend(self.behaviors);

        Dispatcher {
            handlers: self.handlers,
            behaviors,
        }
    }
}
