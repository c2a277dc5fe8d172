//! Snapshot storage abstraction.
//!
//! The editor persists one full snapshot of the tree under a single
//! well-known key. Hosts inject the backing store: a directory on disk for the
//! CLI, memory for tests.

use crate::error::{CommonError, CommonResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Well-known key the snapshot is stored under
pub const SNAPSHOT_KEY: &str = "treeData";

/// Key-value slot holding the persisted snapshot
pub trait SnapshotStorage {
    /// Replace the stored snapshot
    fn save(&mut self, bytes: &[u8]) -> CommonResult<()>;

    /// Read the stored snapshot, `None` if nothing was saved yet
    fn load(&self) -> CommonResult<Option<Vec<u8>>>;
}

/// Directory-backed storage: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    key: String,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> CommonResult<Self> {
        let key = key.into();
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(CommonError::InvalidStorageKey(key));
        }

        Ok(Self {
            dir: dir.into(),
            key,
        })
    }

    /// Storage under the default snapshot key
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            key: SNAPSHOT_KEY.to_string(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotStorage for FileStorage {
    fn save(&mut self, bytes: &[u8]) -> CommonResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write next to the target, then swap it in
        let path = self.path();
        let tmp = self.dir.join(format!(".{}.json.tmp", self.key));
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), bytes = bytes.len(), "Saved snapshot");
        Ok(())
    }

    fn load(&self) -> CommonResult<Option<Vec<u8>>> {
        let path = self.path();
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "Loaded snapshot");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for testing and embedding
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    pub snapshot: Option<Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            snapshot: Some(bytes.into()),
        }
    }
}

impl SnapshotStorage for MemoryStorage {
    fn save(&mut self, bytes: &[u8]) -> CommonResult<()> {
        self.snapshot = Some(bytes.to_vec());
        Ok(())
    }

    fn load(&self) -> CommonResult<Option<Vec<u8>>> {
        Ok(self.snapshot.clone())
    }
}
