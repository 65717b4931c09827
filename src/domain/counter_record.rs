//! On-disk counter record.
//!
//! The record is a single JSON object, `{"count": 12}`, the same layout
//! as the legacy `tea_count.json` file so existing data files load as-is.
//! The field is typed as `u64`, so negative, fractional, string-encoded or
//! missing counts are all rejected at decode time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::CounterState;
use crate::error::TrackerError;

/// Serialized form of a [`CounterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Number of cups logged.
    pub count: u64,
}

impl CounterRecord {
    /// Decodes and validates a record read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::CorruptState`] if `bytes` is not a JSON
    /// object with a non-negative integer `count` field.
    pub fn decode(bytes: &[u8], path: &Path) -> Result<CounterState, TrackerError> {
        serde_json::from_slice::<Self>(bytes)
            .map(|record| CounterState::new(record.count))
            .map_err(|e| TrackerError::CorruptState {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Encodes `state` into the bytes written to disk.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StorageUnavailable`] if serialization fails.
    pub fn encode(state: CounterState) -> Result<Vec<u8>, TrackerError> {
        serde_json::to_vec(&Self {
            count: state.count(),
        })
        .map_err(|e| TrackerError::storage("encoding counter record", e.into()))
    }
}
