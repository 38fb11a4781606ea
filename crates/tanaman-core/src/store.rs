//! Snapshot storage backends.
//!
//! A store maps a fixed key to one JSON document. Reads never fail: a
//! missing or unreadable document simply means there is no saved game.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Errors that can occur while writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The save directory or file could not be written.
    #[error("failed to write snapshot {path}: {source}")]
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Somewhere snapshots can be kept.
pub trait SnapshotStore: Send {
    /// The document stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Replace the document stored under `key`.
    fn save(&mut self, key: &str, json: &str) -> Result<(), StoreError>;
}

/// In-memory store used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no document is stored.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.documents.get(key).cloned()
    }

    fn save(&mut self, key: &str, json: &str) -> Result<(), StoreError> {
        self.documents.insert(key.to_owned(), json.to_owned());
        Ok(())
    }
}

/// Stores each document as `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file first and are then renamed into
/// place, so a crash mid-save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document stored under `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(json) => Some(json),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No saved game");
                None
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Could not read saved game");
                None
            }
        }
    }

    fn save(&mut self, key: &str, json: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let io_error = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_error)?;
        let staging = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&staging, json).map_err(io_error)?;
        std::fs::rename(&staging, &path).map_err(io_error)?;
        debug!(path = %path.display(), bytes = json.len(), "Snapshot written");
        Ok(())
    }
}
