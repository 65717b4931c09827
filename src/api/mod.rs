//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Tea endpoints are mounted at the root (`/tea`, `/tea/status`) to stay
//! compatible with existing clients.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes())
}
