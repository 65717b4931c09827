//! Domain layer: the counter value and its persisted record.
//!
//! [`CounterState`] is the validated in-memory value. [`CounterRecord`] is
//! the on-disk JSON shape, kept separate so that decoding and validation of
//! untrusted file contents happen in exactly one place.

pub mod counter_record;
pub mod counter_state;

pub use counter_record::CounterRecord;
pub use counter_state::CounterState;
