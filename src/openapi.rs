//! OpenAPI document for the tea tracker.
//!
//! Served through Swagger UI when the `swagger-ui` feature is enabled.

use utoipa::OpenApi;

use crate::api::dto::{LogCupResponse, StatusResponse};
use crate::api::handlers::system::HealthResponse;
use crate::error::{ErrorBody, ErrorResponse};

/// Aggregated OpenAPI specification for all REST endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "tea-tracker",
        description = "Durable counter for cups of tea"
    ),
    paths(
        crate::api::handlers::tea::log_cup,
        crate::api::handlers::tea::get_status,
        crate::api::handlers::system::health_handler,
    ),
    components(schemas(
        LogCupResponse,
        StatusResponse,
        HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Tea", description = "Log cups and read the total"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
