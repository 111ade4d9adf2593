//! Request logging behavior.

use crate::{BoxedRequest, BoxedResponse, Next, PipelineBehavior, RequestContext};
use async_trait::async_trait;
use eshop_core::EshopResult;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Outermost behavior: records entry, outcome and elapsed time of every
/// request, including validation failures. Errors are re-raised unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBehavior;

#[async_trait]
impl PipelineBehavior for LoggingBehavior {
    async fn handle(
        &self,
        request: BoxedRequest,
        ctx: &RequestContext,
        next: Next<'_>,
    ) -> EshopResult<BoxedResponse> {
        let span = info_span!("request", request_type = ctx.request_type, kind = %ctx.kind);

        async move {
            let started = Instant::now();
            info!(request = ?request, "request started");

            let result = next.run(request).await;
            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) => {
                    info!(duration_ms, "request completed");
                    debug!(response = ?response, "response");
                }
                Err(e) if e.is_client_error() => {
                    warn!(duration_ms, error_code = e.error_code(), error = %e, "request failed");
                }
                Err(e) => {
                    error!(duration_ms, error_code = e.error_code(), error = %e, "request failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}
