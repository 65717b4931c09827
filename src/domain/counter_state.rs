//! The tea counter value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Number of cups logged since the counter file was first created.
///
/// Wraps a `u64`. The only mutation is [`CounterState::next`], which never
/// wraps, so the value is monotonically non-decreasing for the lifetime of
/// the counter file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CounterState(u64);

impl CounterState {
    /// The state of a freshly initialized counter.
    pub const ZERO: Self = Self(0);

    /// Creates a state holding `count`.
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    /// Returns the raw count.
    #[must_use]
    pub const fn count(self) -> u64 {
        self.0
    }

    /// Returns the state after one more cup.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::CounterOverflow`] when the count is already
    /// `u64::MAX`.
    pub fn next(self) -> Result<Self, TrackerError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(TrackerError::CounterOverflow(self.0))
    }
}

impl fmt::Display for CounterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CounterState> for u64 {
    fn from(state: CounterState) -> Self {
        state.0
    }
}
