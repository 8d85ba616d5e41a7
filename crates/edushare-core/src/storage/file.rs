//! Library snapshots as JSON files on the local filesystem.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::catalog::Library;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SNAPSHOT_EXTENSION: &str = "json";

/// One `<id>.json` snapshot per library in a base directory.
pub struct FileStorage {
    base_path: PathBuf,
}

fn io_error(action: &str, path: &Path, e: io::Error) -> StorageError {
    StorageError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
}

impl FileStorage {
    /// Open storage rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&base_path).map_err(|e| io_error("create", &base_path, e))?;
        Ok(Self { base_path })
    }

    /// Storage under [`default_data_dir`]`/libraries`.
    pub fn default_location() -> StorageResult<Self> {
        Self::new(default_data_dir()?.join("libraries"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Snapshot path for a library id.
    ///
    /// Ids are used as file stems verbatim, so only ASCII letters, digits,
    /// `-` and `_` are accepted. Anything else is [`StorageError::InvalidId`],
    /// which keeps `list` returning exactly the ids that were saved.
    fn snapshot_path(&self, id: &str) -> StorageResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidId(id.to_string()));
        }
        Ok(self.base_path.join(format!("{}.{}", id, SNAPSHOT_EXTENSION)))
    }
}

/// Per-user data directory for EduShare (`<data_local_dir>/edushare`).
///
/// On Unix this is `~/.local/share/edushare`, on Windows
/// `%LOCALAPPDATA%\edushare`.
pub fn default_data_dir() -> StorageResult<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
    Ok(base.join("edushare"))
}

impl Storage for FileStorage {
    fn save(&self, id: &str, library: &Library) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.snapshot_path(id);
        let json = library.to_json();

        Box::pin(async move {
            let path = path?;
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json).map_err(|e| io_error("write", &path, e))?;
            log::debug!("Saved library snapshot {}", path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Library>> {
        let path = self.snapshot_path(id);
        let id = id.to_string();

        Box::pin(async move {
            let path = path?;
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(StorageError::NotFound(id));
                }
                Err(e) => return Err(io_error("read", &path, e)),
            };
            Library::from_json(&json).map_err(|e| {
                log::warn!("Unreadable library snapshot {}: {}", path.display(), e);
                StorageError::Serialization(format!("{}: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.snapshot_path(id);

        Box::pin(async move {
            let path = path?;
            match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(io_error("delete", &path, e)),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries =
                fs::read_dir(&self.base_path).map_err(|e| io_error("list", &self.base_path, e))?;

            let mut ids: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == SNAPSHOT_EXTENSION))
                .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
                .collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.snapshot_path(id);
        Box::pin(async move { Ok(path?.is_file()) })
    }
}
