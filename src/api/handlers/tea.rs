//! Tea handlers: log a cup, get status.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{LogCupResponse, StatusResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, TrackerError};

/// `GET /tea` — Log one cup of tea.
///
/// Every call is a new cup; retried requests count again.
///
/// # Errors
///
/// Returns [`TrackerError`] if the new total could not be persisted.
#[utoipa::path(
    get,
    path = "/tea",
    tag = "Tea",
    summary = "Log a cup of tea",
    description = "Increments the counter and returns the new total once it is durable. Not idempotent.",
    responses(
        (status = 200, description = "Cup logged", body = LogCupResponse),
        (status = 500, description = "Counter state is corrupt or internal failure", body = ErrorResponse),
        (status = 503, description = "Counter storage unavailable", body = ErrorResponse),
    )
)]
pub async fn log_cup(State(state): State<AppState>) -> Result<impl IntoResponse, TrackerError> {
    let logged = state.counter_service.log_cup().await?;
    Ok(Json(LogCupResponse::from(logged)))
}

/// `GET /tea/status` — Current number of cups.
#[utoipa::path(
    get,
    path = "/tea/status",
    tag = "Tea",
    summary = "Get tea status",
    description = "Returns the last committed total without changing it.",
    responses(
        (status = 200, description = "Current total", body = StatusResponse),
    )
)]
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        total_cups: state.counter_service.status().await,
    })
}

/// Tea routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tea", get(log_cup))
        .route("/tea/status", get(get_status))
}
