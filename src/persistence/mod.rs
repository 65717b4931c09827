//! Persistence layer: the on-disk counter file and the store built on it.
//!
//! [`CounterFile`] implements the stage-fsync-rename commit protocol and
//! startup recovery. [`CounterStore`] adds the locking that makes
//! increments linearizable and reads non-blocking.

pub mod counter_file;
pub mod counter_store;

pub use counter_file::CounterFile;
pub use counter_store::CounterStore;
