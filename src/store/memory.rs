//! In-process backend for development and tests.

use super::{ObjectStore, StoreError};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Barrier;

/// A stored object with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object body.
    pub body: Bytes,
    /// Content type given on the last write.
    pub content_type: String,
}

/// Object store kept in process memory.
///
/// Reads and writes can be made to fail to simulate a denied or unreachable
/// backend. Reads can be held until several callers have read, to line up
/// overlapping appends. Every call is counted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, StoredObject>>,
    deny_reads: AtomicBool,
    deny_writes: AtomicBool,
    read_barrier: Mutex<Option<Arc<Barrier>>>,
    head_calls: AtomicU64,
    get_calls: AtomicU64,
    put_calls: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an object without counting a write.
    pub fn insert(&self, key: &str, body: impl Into<Bytes>) {
        self.objects.write().insert(
            key.to_string(),
            StoredObject {
                body: body.into(),
                content_type: super::JSON_CONTENT_TYPE.to_string(),
            },
        );
    }

    /// Returns a copy of the object at `key`.
    #[must_use]
    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().get(key).cloned()
    }

    /// Returns the sorted list of stored keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Makes existence checks and reads fail with an access error.
    pub fn deny_reads(&self, deny: bool) {
        self.deny_reads.store(deny, Ordering::SeqCst);
    }

    /// Makes writes fail with an access error.
    pub fn deny_writes(&self, deny: bool) {
        self.deny_writes.store(deny, Ordering::SeqCst);
    }

    /// Holds every read until `parties` reads have fetched their body, so
    /// that many concurrent callers see the same snapshot. `0` or `1`
    /// turns it off.
    pub fn sync_reads(&self, parties: usize) {
        *self.read_barrier.lock() = (parties > 1).then(|| Arc::new(Barrier::new(parties)));
    }

    /// Number of existence checks performed.
    #[must_use]
    pub fn head_calls(&self) -> u64 {
        self.head_calls.load(Ordering::SeqCst)
    }

    /// Number of reads performed.
    #[must_use]
    pub fn get_calls(&self) -> u64 {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Number of writes performed.
    #[must_use]
    pub fn put_calls(&self) -> u64 {
        self.put_calls.load(Ordering::SeqCst)
    }

    fn access_denied(operation: &'static str, key: &str) -> StoreError {
        StoreError::Backend {
            operation,
            key: key.to_string(),
            message: "AccessDenied: Access Denied".to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        if self.deny_reads.load(Ordering::SeqCst) {
            return Err(Self::access_denied("HeadObject", key));
        }
        Ok(self.objects.read().contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.deny_reads.load(Ordering::SeqCst) {
            return Err(Self::access_denied("GetObject", key));
        }
        let body = self
            .objects
            .read()
            .get(key)
            .map(|obj| obj.body.clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()));

        let barrier = self.read_barrier.lock().clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        body
    }

    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(Self::access_denied("PutObject", key));
        }
        self.objects.write().insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
