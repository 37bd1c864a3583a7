//! Status-file adapter.
//!
//! Implements [`SnapshotStore`] on a single plain-text file.
//!
//! - Writes go to a sibling `.tmp` file which is then renamed over the
//!   target, so a crash mid-write leaves either the old or the new
//!   snapshot, never half of one.
//! - The default location is the per-user data directory reported by
//!   the `directories` crate; the directory is created on demand.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::app::ports::{SnapshotStore, StorageError};
use crate::config::EngineConfig;

const QUALIFIER: &str = "";
const ORGANIZATION: &str = "heaterfuel";
const APPLICATION: &str = "heaterfuel";

/// Snapshot stored as a file on disk.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Store at an explicit path.  The parent directory must exist.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store named by `config.status_file_name` inside `dir`, creating
    /// `dir` if needed.
    pub fn in_dir(dir: &Path, config: &EngineConfig) -> crate::error::Result<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            warn!("FileSnapshotStore: cannot create {}: {}", dir.display(), e);
            StorageError::Unavailable
        })?;
        let store = Self::at(dir.join(&config.status_file_name));
        info!("FileSnapshotStore: using {}", store.path.display());
        Ok(store)
    }

    /// Store in the platform's per-user data directory.
    pub fn default_location(config: &EngineConfig) -> crate::error::Result<Self> {
        let dirs = directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(StorageError::Unavailable)?;
        Self::in_dir(dirs.data_dir(), config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes).map_err(|_| StorageError::NotText)?;
                debug!("FileSnapshotStore: read {} bytes", text.len());
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!("FileSnapshotStore: read {} failed: {}", self.path.display(), e);
                Err(StorageError::IoError)
            }
        }
    }

    fn save(&mut self, text: &str) -> Result<(), StorageError> {
        let tmp = self.tmp_path();
        fs::write(&tmp, text)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                warn!("FileSnapshotStore: write {} failed: {}", self.path.display(), e);
                StorageError::IoError
            })
    }

    fn delete(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("FileSnapshotStore: deleted {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("FileSnapshotStore: delete {} failed: {}", self.path.display(), e);
                Err(StorageError::IoError)
            }
        }
    }
}
