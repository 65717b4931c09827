//! # tea-tracker
//!
//! Durable HTTP counter for cups of tea.
//!
//! A client logs a cup with `GET /tea` and reads the running total with
//! `GET /tea/status`. The counter survives restarts, never loses or
//! double-counts an acknowledged cup under concurrent requests, and
//! recovers cleanly from a crash in the middle of a write.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── CounterService (service/)
//!     │
//!     ├── CounterStore (persistence/)
//!     ├── CounterFile: stage → fsync → rename
//!     │
//!     └── tea_count.json
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod openapi;
pub mod persistence;
pub mod service;
