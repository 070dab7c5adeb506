//! File-backed storage slot.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{CartPersistence, PersistenceError, STORAGE_KEY, decode, encode};
use crate::state::CartState;

/// Cart persistence in `<dir>/cart-storage.json`.
///
/// Each save writes its own uniquely named temp file next to the target and
/// renames it into place, so a crash mid-write leaves the previous cart
/// readable and concurrent writers never share a half-written file. The
/// last rename wins.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    /// Store the cart under `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl CartPersistence for FilePersistence {
    fn load(&self) -> Result<Option<CartState>, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&raw).map(Some)
    }

    fn save(&self, state: &CartState) -> Result<(), PersistenceError> {
        let raw = encode(state)?;
        let dir = self.dir();
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(raw.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), bytes = raw.len(), "Cart saved");
        Ok(())
    }
}
