//! Storage abstraction for persistence.
//!
//! Two concerns live here: [`Storage`] persists whole [`Library`] snapshots,
//! and [`BlobStore`] holds the bytes of uploaded files. [`upload`] and
//! [`remove_resource`] keep the two in step.

mod blob;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use blob::{BlobStore, MemoryBlobStore};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use blob::DirBlobStore;
#[cfg(not(target_arch = "wasm32"))]
pub use file::{default_data_dir, FileStorage};

use crate::catalog::{CatalogError, Library, NewResource, Resource, ResourceId, UserId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid id: {0:?}")]
    InvalidId(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for library storage backends.
///
/// Implementations can keep libraries in memory or on the filesystem.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a library.
    fn save(&self, id: &str, library: &Library) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a library.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Library>>;

    /// Delete a library.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all library IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a library exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for library storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a library.
    fn save(&self, id: &str, library: &Library) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a library.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Library>>;

    /// Delete a library.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all library IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a library exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Register an upload in `library` and store its bytes.
///
/// The metadata is only kept if the bytes were written.
pub async fn upload<B: BlobStore + ?Sized>(
    library: &mut Library,
    blobs: &B,
    uploader: UserId,
    form: NewResource,
    bytes: Vec<u8>,
) -> StorageResult<Resource> {
    let resource = library.add_resource(uploader, form)?.clone();
    if let Err(e) = blobs.put(&resource.filename, bytes).await {
        log::warn!("Failed to store {}: {}", resource.filename, e);
        library.delete_resource(uploader, resource.id)?;
        return Err(e);
    }
    Ok(resource)
}

/// Delete a resource, its reviews and its stored file.
///
/// A stored file that is already gone is not an error.
pub async fn remove_resource<B: BlobStore + ?Sized>(
    library: &mut Library,
    blobs: &B,
    user: UserId,
    id: ResourceId,
) -> StorageResult<Resource> {
    let resource = library.delete_resource(user, id)?;
    match blobs.remove(&resource.filename).await {
        Ok(()) | Err(StorageError::NotFound(_)) => Ok(resource),
        Err(e) => Err(e),
    }
}


#[cfg(test)]
mod tests {
    use super::test_util::block_on;
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_upload_stores_bytes() {
        let mut library = Library::new();
        let blobs = MemoryBlobStore::new();
        let alice = Uuid::new_v4();

        let res = block_on(upload(
            &mut library,
            &blobs,
            alice,
            NewResource::new("notes.txt").title("Notes"),
            b"hello".to_vec(),
        ))
        .unwrap();

        assert_eq!(block_on(blobs.get(&res.filename)).unwrap(), b"hello");
        assert_eq!(library.resource(res.id).unwrap().title, "Notes");
    }

    #[test]
    fn test_rejected_upload_stores_nothing() {
        let mut library = Library::new();
        let blobs = MemoryBlobStore::new();

        let result = block_on(upload(
            &mut library,
            &blobs,
            Uuid::new_v4(),
            NewResource::new("tool.exe"),
            vec![0; 4],
        ));

        assert!(matches!(
            result,
            Err(StorageError::Catalog(CatalogError::FileTypeNotAllowed(_)))
        ));
        assert!(block_on(blobs.list()).unwrap().is_empty());
    }

    #[test]
    fn test_remove_resource_tolerates_missing_file() {
        let mut library = Library::new();
        let blobs = MemoryBlobStore::new();
        let alice = Uuid::new_v4();
        let res = block_on(upload(
            &mut library,
            &blobs,
            alice,
            NewResource::new("a.pdf"),
            vec![1, 2, 3],
        ))
        .unwrap();

        block_on(blobs.remove(&res.filename)).unwrap();
        let removed = block_on(remove_resource(&mut library, &blobs, alice, res.id)).unwrap();
        assert_eq!(removed.id, res.id);
        assert!(library.resources().is_empty());
    }

    #[test]
    fn test_remove_resource_forbidden_keeps_file() {
        let mut library = Library::new();
        let blobs = MemoryBlobStore::new();
        let alice = Uuid::new_v4();
        let res = block_on(upload(
            &mut library,
            &blobs,
            alice,
            NewResource::new("a.pdf"),
            vec![1],
        ))
        .unwrap();

        let result = block_on(remove_resource(&mut library, &blobs, Uuid::new_v4(), res.id));
        assert!(matches!(result, Err(StorageError::Catalog(CatalogError::Forbidden))));
        assert!(block_on(blobs.exists(&res.filename)).unwrap());
    }
}
