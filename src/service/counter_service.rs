//! Counter service: the "log a cup" and "get status" operations.

use std::path::Path;

use crate::error::TrackerError;
use crate::persistence::CounterStore;

/// Confirmation message returned for every logged cup.
pub const CUP_LOGGED_MESSAGE: &str = "Cup of tea logged!";

/// Outcome of logging one cup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CupLogged {
    /// Fixed confirmation message.
    pub message: &'static str,
    /// Total after this cup.
    pub total_cups: u64,
}

/// Orchestration layer over the [`CounterStore`].
///
/// Holds the store explicitly; there is no process-wide counter. Storage
/// errors are passed through untouched so the HTTP layer can report them.
#[derive(Debug, Clone)]
pub struct CounterService {
    store: CounterStore,
}

impl CounterService {
    /// Creates a new `CounterService` over an opened store.
    #[must_use]
    pub fn new(store: CounterStore) -> Self {
        Self { store }
    }

    /// Logs one cup of tea.
    ///
    /// Not idempotent: every call is a new cup, including client retries.
    ///
    /// # Errors
    ///
    /// Returns a [`TrackerError`] if the increment could not be committed.
    pub async fn log_cup(&self) -> Result<CupLogged, TrackerError> {
        let total_cups = self.store.increment().await?;
        tracing::info!(total_cups, "cup of tea logged");
        Ok(CupLogged {
            message: CUP_LOGGED_MESSAGE,
            total_cups,
        })
    }

    /// Returns the number of cups logged so far.
    pub async fn status(&self) -> u64 {
        let total_cups = self.store.read().await;
        tracing::debug!(total_cups, "status queried");
        total_cups
    }

    /// Location of the counter file.
    #[must_use]
    pub fn storage_path(&self) -> &Path {
        self.store.path()
    }
}
