//! Durable, race-free storage of the tea counter.
//!
//! [`CounterStore`] keeps two pieces of state:
//!
//! - the last committed value, behind a [`tokio::sync::RwLock`] that is
//!   only write-locked for the in-memory swap after a successful commit;
//! - the [`CounterFile`], behind a [`tokio::sync::Mutex`] that serializes
//!   the whole "read current, compute next, persist, publish" sequence.
//!
//! Readers never wait on disk I/O and never see a value that has not been
//! renamed into place.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::CounterFile;
use crate::domain::CounterState;
use crate::error::TrackerError;

/// Handle to the counter store. Cheap to clone; all clones share state.
///
/// A `CounterStore` can only be obtained through [`CounterStore::open`],
/// so every value of this type refers to an initialized counter.
///
/// # Concurrency
///
/// - Increments are serialized and linearizable.
/// - Reads run concurrently with each other and with in-flight commits.
/// - A read issued after an increment returned `v` observes at least `v`.
/// - A single writer process is assumed; nothing guards the file against
///   other processes.
#[derive(Debug, Clone)]
pub struct CounterStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    path: PathBuf,
    committed: RwLock<CounterState>,
    writer: Mutex<CounterFile>,
}

impl CounterStore {
    /// Opens the counter stored at `path`, recovering from an interrupted
    /// write and initializing a fresh counter if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::CorruptState`] if the file exists but holds
    /// an invalid record, and [`TrackerError::StorageUnavailable`] on I/O
    /// failure. An invalid file is never reset to zero.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, TrackerError> {
        let file = CounterFile::new(path);
        file.discard_staging().await?;

        let state = match file.load().await? {
            Some(state) => {
                tracing::info!(
                    path = %file.path().display(),
                    total_cups = state.count(),
                    "loaded counter"
                );
                state
            }
            None => Self::initialize(&file).await?,
        };

        Ok(Self {
            inner: Arc::new(StoreInner {
                path: file.path().to_path_buf(),
                committed: RwLock::new(state),
                writer: Mutex::new(file),
            }),
        })
    }

    /// Durably establishes a zero counter before anything is served.
    async fn initialize(file: &CounterFile) -> Result<CounterState, TrackerError> {
        file.commit(CounterState::ZERO).await?;
        tracing::info!(path = %file.path().display(), "initialized new counter");
        Ok(CounterState::ZERO)
    }

    /// Adds one cup and returns the new total once it is durable.
    ///
    /// The commit runs on its own task: dropping the returned future does
    /// not abort a commit that has already started, so the in-memory value
    /// always matches the file.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StorageUnavailable`] if the new value could
    /// not be persisted (the counter is left unchanged),
    /// [`TrackerError::CounterOverflow`] at `u64::MAX`, and
    /// [`TrackerError::ConcurrencyViolation`] if the commit task died.
    pub async fn increment(&self) -> Result<u64, TrackerError> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.increment().await })
            .await
            .map_err(|e| TrackerError::ConcurrencyViolation(format!("commit task failed: {e}")))?
    }

    /// Returns the last committed total.
    pub async fn read(&self) -> u64 {
        self.inner.committed.read().await.count()
    }

    /// Canonical storage location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl StoreInner {
    async fn increment(&self) -> Result<u64, TrackerError> {
        let file = self.writer.lock().await;

        let current = *self.committed.read().await;
        let next = current.next()?;

        if let Err(e) = file.commit(next).await {
            tracing::error!(total_cups = current.count(), error = %e, "failed to commit cup");
            return Err(e);
        }

        *self.committed.write().await = next;
        tracing::debug!(total_cups = next.count(), "committed cup");
        Ok(next.count())
    }
}
