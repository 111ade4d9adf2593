//! Application state for Axum handlers.

use eshop_core::CancellationToken;
use eshop_cqrs::Dispatcher;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    /// Fires only when the shutdown drain period runs out; requests still in
    /// flight then stop their store and cache calls.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(dispatcher: Arc<Dispatcher>, shutdown: CancellationToken) -> Self {
        Self { dispatcher, shutdown }
    }
}
