//! Crash-safe access to the counter file.
//!
//! Every commit follows the same sequence:
//! 1. Write the encoded record to a staging file next to the counter file
//! 2. `fsync` the staging file
//! 3. Rename the staging file over the counter file (atomic on POSIX)
//! 4. `fsync` the parent directory so the rename itself is durable
//!
//! At every instant the counter file therefore holds either the previous
//! record or the new one in full. A crash before step 3 leaves only a stale
//! staging file behind, which [`CounterFile::discard_staging`] removes on
//! the next start.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::{CounterRecord, CounterState};
use crate::error::TrackerError;

/// Suffix appended to the counter file name to form the staging path.
const STAGING_SUFFIX: &str = ".tmp";

/// Canonical counter file plus its staging sibling.
#[derive(Debug, Clone)]
pub struct CounterFile {
    path: PathBuf,
    staging_path: PathBuf,
}

impl CounterFile {
    /// Creates a handle for the counter file at `path`.
    ///
    /// No I/O happens until one of the async methods is called.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut staging_name: OsString = path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        staging_name.push(STAGING_SUFFIX);
        let staging_path = path.with_file_name(staging_name);
        Self { path, staging_path }
    }

    /// Canonical storage location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the staging file used during commits.
    #[must_use]
    pub fn staging_path(&self) -> &Path {
        &self.staging_path
    }

    /// Creates the parent directory if needed and removes a staging file
    /// left behind by an interrupted commit.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StorageUnavailable`] if the directory cannot
    /// be created or the stale staging file cannot be removed.
    pub async fn discard_staging(&self) -> Result<(), TrackerError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).await.map_err(|e| {
            TrackerError::storage(format!("creating directory {}", dir.display()), e)
        })?;

        match fs::remove_file(&self.staging_path).await {
            Ok(()) => {
                tracing::warn!(
                    staging = %self.staging_path.display(),
                    "discarded staging file from an interrupted write"
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TrackerError::storage(
                format!("removing stale {}", self.staging_path.display()),
                e,
            )),
        }
    }

    /// Reads and validates the committed record.
    ///
    /// Returns `Ok(None)` when the counter file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StorageUnavailable`] on I/O failure and
    /// [`TrackerError::CorruptState`] if the file holds an invalid record.
    pub async fn load(&self) -> Result<Option<CounterState>, TrackerError> {
        match fs::read(&self.path).await {
            Ok(bytes) => CounterRecord::decode(&bytes, &self.path).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TrackerError::storage(
                format!("reading {}", self.path.display()),
                e,
            )),
        }
    }

    /// Durably replaces the committed record with `state`.
    ///
    /// On error the counter file still holds the previous record.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StorageUnavailable`] if staging or the
    /// rename fails.
    pub async fn commit(&self, state: CounterState) -> Result<(), TrackerError> {
        let bytes = CounterRecord::encode(state)?;

        let staged = self.stage(&bytes).await;
        let renamed = match staged {
            Ok(()) => fs::rename(&self.staging_path, &self.path)
                .await
                .map_err(|e| {
                    TrackerError::storage(
                        format!(
                            "renaming {} to {}",
                            self.staging_path.display(),
                            self.path.display()
                        ),
                        e,
                    )
                }),
            Err(e) => Err(e),
        };

        if let Err(e) = renamed {
            self.remove_failed_staging().await;
            return Err(e);
        }

        self.sync_parent_dir().await;
        Ok(())
    }

    async fn stage(&self, bytes: &[u8]) -> Result<(), TrackerError> {
        let staging = self.staging_path.display();

        let mut file = fs::File::create(&self.staging_path)
            .await
            .map_err(|e| TrackerError::storage(format!("creating {staging}"), e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| TrackerError::storage(format!("writing {staging}"), e))?;
        file.flush()
            .await
            .map_err(|e| TrackerError::storage(format!("flushing {staging}"), e))?;
        file.sync_all()
            .await
            .map_err(|e| TrackerError::storage(format!("syncing {staging}"), e))?;
        Ok(())
    }

    /// Best effort. The counter file is untouched, so failures are logged only.
    async fn remove_failed_staging(&self) {
        match fs::remove_file(&self.staging_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                staging = %self.staging_path.display(),
                error = %e,
                "failed to remove staging file after failed commit"
            ),
        }
    }

    /// Best effort. Runs after the rename, so failures are logged only.
    async fn sync_parent_dir(&self) {
        let dir = self.parent_dir();
        let synced = match fs::File::open(dir).await {
            Ok(handle) => handle.sync_all().await,
            Err(e) => Err(e),
        };
        if let Err(e) = synced {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to sync counter directory");
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
