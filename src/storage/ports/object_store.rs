//! Object store port for persisting uploaded payloads.

use crate::storage::domain::{ObjectKey, StorageLocation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Result type for object store operations.
pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;

/// Byte stream handed to the store for one upload.
pub type PayloadReader<'a> = &'a mut (dyn AsyncRead + Send + Unpin);

/// Capability to persist a binary payload under a generated key.
///
/// Implementations must accept arbitrary binary streams up to typical CSV
/// file sizes and must be safe to call concurrently with distinct keys.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Persists `payload` under `key` and returns the durable location.
    ///
    /// `size` is the payload length in bytes as declared by the caller;
    /// implementations may use it to pre-allocate or to pass through to a
    /// remote store.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::WriteFailed`] when the store rejects or
    /// fails the write. A failed `put` persists nothing the caller needs
    /// to clean up.
    async fn put(
        &self,
        key: &ObjectKey,
        size: u64,
        payload: PayloadReader<'_>,
    ) -> ObjectStoreResult<StorageLocation>;
}

/// Errors returned by object store implementations.
#[derive(Debug, Clone, Error)]
pub enum ObjectStoreError {
    /// The store rejected or failed the write.
    #[error("object write failed for key {key}: {source}")]
    WriteFailed {
        /// Key the failed write targeted.
        key: ObjectKey,
        /// Underlying store failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl ObjectStoreError {
    /// Wraps a store failure for the given key.
    pub fn write_failed(
        key: ObjectKey,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::WriteFailed {
            key,
            source: Arc::new(err),
        }
    }
}
