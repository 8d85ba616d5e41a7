//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::catalog::Library;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Library snapshots kept in a map, for tests and previews.
#[derive(Default)]
pub struct MemoryStorage {
    libraries: RwLock<HashMap<String, Library>>,
}

fn poisoned<T>(e: PoisonError<T>) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<String, Library>>> {
        self.libraries.read().map_err(poisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<String, Library>>> {
        self.libraries.write().map_err(poisoned)
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, library: &Library) -> BoxFuture<'_, StorageResult<()>> {
        let entry = (id.to_string(), library.clone());
        Box::pin(async move {
            let (id, library) = entry;
            self.write()?.insert(id, library);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Library>> {
        let id = id.to_string();
        Box::pin(async move {
            let snapshot = self.read()?.get(&id).cloned();
            snapshot.ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.write()?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let mut ids: Vec<String> = self.read()?.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read()?.contains_key(&id)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewResource;
    use crate::storage::test_util::block_on;
    use uuid::Uuid;

    fn sample() -> Library {
        let mut library = Library::new();
        library
            .add_resource(Uuid::new_v4(), NewResource::new("intro.pdf").title("Intro"))
            .unwrap();
        library
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let library = sample();

        block_on(storage.save("school", &library)).unwrap();
        let loaded = block_on(storage.load("school")).unwrap();

        assert_eq!(loaded, library);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();

        assert!(!block_on(storage.exists("school")).unwrap());
        block_on(storage.save("school", &Library::new())).unwrap();
        assert!(block_on(storage.exists("school")).unwrap());

        block_on(storage.delete("school")).unwrap();
        assert!(!block_on(storage.exists("school")).unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();

        block_on(storage.save("lib1", &Library::new())).unwrap();
        block_on(storage.save("lib2", &sample())).unwrap();

        assert_eq!(block_on(storage.list()).unwrap(), vec!["lib1", "lib2"]);
    }
}
