//! Capability-scoped directory object store.
//!
//! Backs uploads with a local directory for development and integration
//! testing. The adapter holds a `cap-std` directory capability rather than
//! ambient filesystem access, so it can only ever write inside the
//! directory it was constructed with.

use crate::storage::{
    domain::{ObjectKey, StorageLocation},
    ports::{ObjectStore, ObjectStoreError, ObjectStoreResult, PayloadReader},
};
use async_trait::async_trait;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Object store writing payloads into a capability-scoped directory.
#[derive(Debug, Clone)]
pub struct DirObjectStore {
    dir: Arc<Dir>,
    base: String,
}

impl DirObjectStore {
    /// Creates a store rooted at `dir`.
    ///
    /// `base` is the advertised location prefix recorded on tasks (for
    /// example `file:///var/lib/csvtrack/uploads`); the capability itself
    /// carries no inspectable path.
    #[must_use]
    pub fn new(dir: Dir, base: impl Into<String>) -> Self {
        Self {
            dir: Arc::new(dir),
            base: base.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl ObjectStore for DirObjectStore {
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

        let dir = Arc::clone(&self.dir);
        let file_name = key.as_str().to_owned();
        let write_key = key.clone();
        tokio::task::spawn_blocking(move || dir.write(file_name.as_str(), &bytes))
            .await
            .map_err(|err| ObjectStoreError::write_failed(write_key.clone(), err))?
            .map_err(|err| ObjectStoreError::write_failed(write_key, err))?;

        StorageLocation::new(format!("{}/{key}", self.base))
            .map_err(|err| ObjectStoreError::write_failed(key.clone(), err))
    }
}
