//! Request validation behavior.

use crate::validation::ErasedValidator;
use crate::{BoxedRequest, BoxedResponse, Next, PipelineBehavior, RequestContext};
use async_trait::async_trait;
use eshop_core::{EshopError, EshopResult};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Runs every validator registered for the request's type before the inner
/// stages. Any violation fails the call with
/// [`EshopError::ValidationFailed`] and the handler is never invoked.
pub struct ValidationBehavior {
    validators: HashMap<TypeId, Vec<Arc<dyn ErasedValidator>>>,
}

impl ValidationBehavior {
    pub(crate) fn new(validators: HashMap<TypeId, Vec<Arc<dyn ErasedValidator>>>) -> Self {
        Self { validators }
    }
}

#[async_trait]
impl PipelineBehavior for ValidationBehavior {
    async fn handle(
        &self,
        request: BoxedRequest,
        ctx: &RequestContext,
        next: Next<'_>,
    ) -> EshopResult<BoxedResponse> {
        let Some(validators) = self.validators.get(&ctx.request_type_id) else {
            return next.run(request).await;
        };

        let mut violations: Vec<_> = validators
            .iter()
            .flat_map(|validator| validator.validate(request.as_any()))
            .collect();

        if violations.is_empty() {
            return next.run(request).await;
        }

        violations.sort_by(|a, b| a.field.cmp(&b.field));
        debug!(
            request_type = ctx.request_type,
            violations = violations.len(),
            "request rejected by validation"
        );
        Err(EshopError::ValidationFailed(violations))
    }
}
