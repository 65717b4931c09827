//! Service layer: business logic orchestration.
//!
//! [`CounterService`] turns the two inbound operations, "log a cup" and
//! "get status", into calls on the [`crate::persistence::CounterStore`].

pub mod counter_service;

pub use counter_service::CounterService;
