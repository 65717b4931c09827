//! Tea counter DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::counter_service::CupLogged;

/// Response body for `GET /tea`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogCupResponse {
    /// Fixed confirmation message.
    #[schema(example = "Cup of tea logged!")]
    pub message: String,
    /// Total cups logged, including this one.
    pub total_cups: u64,
}

impl From<CupLogged> for LogCupResponse {
    fn from(logged: CupLogged) -> Self {
        Self {
            message: logged.message.to_string(),
            total_cups: logged.total_cups,
        }
    }
}

/// Response body for `GET /tea/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Total cups logged so far.
    pub total_cups: u64,
}
