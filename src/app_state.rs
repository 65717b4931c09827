//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::CounterService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Counter service for all business logic.
    pub counter_service: Arc<CounterService>,
}

impl AppState {
    /// Wraps `counter_service` for sharing across handlers.
    #[must_use]
    pub fn new(counter_service: CounterService) -> Self {
        Self {
            counter_service: Arc::new(counter_service),
        }
    }
}
