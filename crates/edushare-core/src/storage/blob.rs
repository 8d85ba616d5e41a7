//! Stores for uploaded file bytes.

use super::{BoxFuture, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for upload byte stores, keyed by stored filename.
#[cfg(not(target_arch = "wasm32"))]
pub trait BlobStore: Send + Sync {
    /// Write a file, replacing any previous content.
    fn put(&self, name: &str, bytes: Vec<u8>) -> BoxFuture<'_, StorageResult<()>>;

    /// Read a file.
    fn get(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>>;

    /// Remove a file. Missing files are reported as [`StorageError::NotFound`].
    fn remove(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List stored file names.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a file exists.
    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for upload byte stores (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait BlobStore {
    /// Write a file, replacing any previous content.
    fn put(&self, name: &str, bytes: Vec<u8>) -> BoxFuture<'_, StorageResult<()>>;

    /// Read a file.
    fn get(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>>;

    /// Remove a file. Missing files are reported as [`StorageError::NotFound`].
    fn remove(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List stored file names.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a file exists.
    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

/// In-memory byte store for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryBlobStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, name: &str, bytes: Vec<u8>) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            self.files.write().map_err(lock_error)?.insert(name, bytes);
            Ok(())
        })
    }

    fn get(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
        let name = name.to_string();
        Box::pin(async move {
            let files = self.files.read().map_err(lock_error)?;
            files.get(&name).cloned().ok_or(StorageError::NotFound(name))
        })
    }

    fn remove(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            let mut files = self.files.write().map_err(lock_error)?;
            files
                .remove(&name)
                .map(|_| ())
                .ok_or(StorageError::NotFound(name))
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let files = self.files.read().map_err(lock_error)?;
            Ok(files.keys().cloned().collect())
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move {
            let files = self.files.read().map_err(lock_error)?;
            Ok(files.contains_key(&name))
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use dir::DirBlobStore;

#[cfg(not(target_arch = "wasm32"))]
mod dir {
    use super::{BlobStore, BoxFuture, StorageError, StorageResult};
    use crate::catalog::secure_filename;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    /// Upload directory on the local filesystem.
    pub struct DirBlobStore {
        base_path: PathBuf,
    }

    impl DirBlobStore {
        /// Use `base_path` as the upload directory, creating it if needed.
        pub fn new(base_path: PathBuf) -> StorageResult<Self> {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create upload directory: {}", e))
            })?;
            Ok(Self { base_path })
        }

        /// Get the base path.
        pub fn base_path(&self) -> &Path {
            &self.base_path
        }

        fn file_path(&self, name: &str) -> PathBuf {
            // Stored names are already flat, but never trust a caller with a path.
            self.base_path.join(secure_filename(name))
        }
    }

    impl BlobStore for DirBlobStore {
        fn put(&self, name: &str, bytes: Vec<u8>) -> BoxFuture<'_, StorageResult<()>> {
            let path = self.file_path(name);
            Box::pin(async move {
                fs::write(&path, bytes).map_err(|e| {
                    StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
                })
            })
        }

        fn get(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
            let path = self.file_path(name);
            let name = name.to_string();
            Box::pin(async move {
                fs::read(&path).map_err(|e| match e.kind() {
                    ErrorKind::NotFound => StorageError::NotFound(name),
                    _ => StorageError::Io(format!("Failed to read {}: {}", path.display(), e)),
                })
            })
        }

        fn remove(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
            let path = self.file_path(name);
            let name = name.to_string();
            Box::pin(async move {
                fs::remove_file(&path).map_err(|e| match e.kind() {
                    ErrorKind::NotFound => StorageError::NotFound(name),
                    _ => StorageError::Io(format!("Failed to delete {}: {}", path.display(), e)),
                })
            })
        }

        fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
            let base = self.base_path.clone();
            Box::pin(async move {
                let entries = fs::read_dir(&base).map_err(|e| {
                    StorageError::Io(format!("Failed to read directory: {}", e))
                })?;
                Ok(entries
                    .flatten()
                    .filter(|entry| entry.path().is_file())
                    .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
                    .collect())
            })
        }

        fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
            let path = self.file_path(name);
            Box::pin(async move { Ok(path.is_file()) })
        }
    }

}
