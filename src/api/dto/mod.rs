//! Data Transfer Objects for REST response serialization.
//!
//! Field names match the legacy JSON API so existing clients keep working.

pub mod tea_dto;

pub use tea_dto::*;
