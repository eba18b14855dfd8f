//! In-memory object store for tests.

use crate::storage::{
    domain::{ObjectKey, StorageLocation},
    ports::{ObjectStore, ObjectStoreError, ObjectStoreResult, PayloadReader},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::io::AsyncReadExt;

/// Thread-safe in-memory object store.
///
/// Locations are reported with a `mem://` prefix so tests can assert that
/// the recorded reference came from this store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<ObjectKey, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when an object is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::WriteFailed`] when the store lock is
    /// poisoned.
    pub fn contains(&self, key: &ObjectKey) -> ObjectStoreResult<bool> {
        let objects = self.objects.read().map_err(|err| {
            ObjectStoreError::write_failed(key.clone(), std::io::Error::other(err.to_string()))
        })?;
        Ok(objects.contains_key(key))
    }

    /// Returns the number of stored objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.read().map_or(0, |objects| objects.len())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        key: &ObjectKey,
        size: u64,
        payload: PayloadReader<'_>,
    ) -> ObjectStoreResult<StorageLocation> {
        let mut bytes = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
        payload
            .read_to_end(&mut bytes)
            .await
            .map_err(|err| ObjectStoreError::write_failed(key.clone(), err))?;

        let mut objects = self.objects.write().map_err(|err| {
            ObjectStoreError::write_failed(key.clone(), std::io::Error::other(err.to_string()))
        })?;
        objects.insert(key.clone(), bytes);

        StorageLocation::new(format!("mem://{key}"))
            .map_err(|err| ObjectStoreError::write_failed(key.clone(), err))
    }
}
