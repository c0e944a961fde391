//! Object storage backends for the daily logs.
//!
//! The appender only needs three primitives: an existence probe, a full read
//! and a full overwrite. None of them is conditional, so concurrent writers to
//! the same key race with last-writer-wins semantics.

mod local;
mod memory;
mod s3;

pub use local::LocalFsStore;
pub use memory::MemoryStore;
pub use s3::S3Store;

use crate::config::{StorageBackend, StorageConfig};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

/// Content type of every log object.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Object store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No object exists at the key.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The backend rejected or failed the request.
    #[error("{operation} failed for {key}: {message}")]
    Backend {
        /// Name of the failed operation.
        operation: &'static str,
        /// Object key.
        key: String,
        /// Backend error message.
        message: String,
    },

    /// Local filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Minimal key/value object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short name of the backend, used in logs.
    fn backend_tag(&self) -> &'static str;

    /// Returns whether an object exists at `key`.
    ///
    /// A missing object is `Ok(false)`; every other failure is an error.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Reads the full object at `key`.
    async fn get(&self, key: &str) -> Result<Bytes, StoreError>;

    /// Replaces the object at `key` unconditionally.
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError>;
}

/// Builds the store selected by the configuration.
///
/// Called once per process; the returned handle is shared by every request.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StoreError> {
    let store: Arc<dyn ObjectStore> = match config.backend {
        StorageBackend::S3 => Arc::new(S3Store::connect(config).await),
        StorageBackend::Local => {
            let root = config.root.clone().unwrap_or_default();
            Arc::new(LocalFsStore::create(root).await?)
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
