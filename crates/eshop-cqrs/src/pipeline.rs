//! Behavior chain plumbing.

use crate::{BoxedRequest, BoxedResponse, Request, RequestHandler, RequestKind};
use async_trait::async_trait;
use eshop_core::{BoxFuture, CancellationToken, EshopError, EshopResult};
use std::any::{type_name, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

/// Per-call metadata shared by every stage of the chain.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Short type name of the request, e.g. `GetBasketQuery`.
    pub request_type: &'static str,
    /// Exact runtime type of the request.
    pub request_type_id: TypeId,
    /// Query or command.
    pub kind: RequestKind,
    /// Caller's cancellation signal.
    pub cancel: CancellationToken,
}

impl RequestContext {
    pub(crate) fn of<R: Request>(cancel: &CancellationToken) -> Self {
        let full = type_name::<R>();
        Self {
            request_type: full.rsplit("::").next().unwrap_or(full),
            request_type_id: TypeId::of::<R>(),
            kind: R::KIND,
            cancel: cancel.clone(),
        }
    }
}

/// A cross-cutting stage wrapping the rest of the chain.
///
/// A behavior either calls `next.run(request)` exactly once and returns its
/// result, or short-circuits with its own error.
#[async_trait]
pub trait PipelineBehavior: Send + Sync {
    /// Runs this stage.
    async fn handle(
        &self,
        request: BoxedRequest,
        ctx: &RequestContext,
        next: Next<'_>,
    ) -> EshopResult<BoxedResponse>;
}

/// The remainder of the chain after the current behavior.
pub struct Next<'a> {
    pub(crate) behaviors: &'a [Arc<dyn PipelineBehavior>],
    pub(crate) handler: &'a dyn ErasedHandler,
    pub(crate) ctx: &'a RequestContext,
}

impl<'a> Next<'a> {
    /// Invokes the next behavior, or the handler once behaviors run out.
    pub fn run(self, request: BoxedRequest) -> BoxFuture<'a, BoxedResponse> {
        Box::pin(async move {
            match self.behaviors.split_first() {
                Some((behavior, rest)) => {
                    let next = Next {
                        behaviors: rest,
                        handler: self.handler,
                        ctx: self.ctx,
                    };
                    behavior.handle(request, self.ctx, next).await
                }
                None => self.handler.handle(request, self.ctx).await,
            }
        })
    }
}

#[async_trait]
pub(crate) trait ErasedHandler: Send + Sync {
    async fn handle(&self, request: BoxedRequest, ctx: &RequestContext) -> EshopResult<BoxedResponse>;
}

pub(crate) struct HandlerAdapter<R, H> {
    handler: H,
    _request: PhantomData<fn(R)>,
}

impl<R, H> HandlerAdapter<R, H> {
    pub(crate) fn new(handler: H) -> Self {
        Self {
            handler,
            _request: PhantomData,
        }
    }
}

#[async_trait]
impl<R, H> ErasedHandler for HandlerAdapter<R, H>
where
    R: Request,
    H: RequestHandler<R>,
{
    async fn handle(&self, request: BoxedRequest, ctx: &RequestContext) -> EshopResult<BoxedResponse> {
        let request = request.into_any().downcast::<R>().map_err(|_| {
            EshopError::internal(format!("request is not a {}", type_name::<R>()))
        })?;

        ctx.cancel.ensure_active()?;

        let response = self.handler.handle(*request, &ctx.cancel).await?;
        Ok(Box::new(response) as BoxedResponse)
    }
}
