//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use snip_core::{Entity, Field, SnipError, SnipResult};
use snip_repository::{MemoryStore, RemoteStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Stalls one single-key read after it has fetched its document.
#[derive(Default)]
pub struct ReadGate {
    pub entered: Notify,
    pub release: Notify,
}

/// Test entity with two queryable text fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bean {
    pub key: String,
    pub value: String,
    pub second: String,
}

impl Bean {
    pub fn new(key: &str, value: &str, second: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            second: second.to_string(),
        }
    }
}

impl Entity for Bean {
    const COLLECTION: &'static str = "Bean";
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "key",
            get: |b: &Bean| b.key.clone(),
        },
        Field {
            name: "value",
            get: |b: &Bean| b.value.clone(),
        },
        Field {
            name: "second",
            get: |b: &Bean| b.second.clone(),
        },
    ];

    fn key(&self) -> &str {
        &self.key
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

/// [`MemoryStore`] wrapper that can fail or stall on demand.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub fail_reads: AtomicBool,
    pub fail_lists: AtomicBool,
    pub fail_writes: AtomicBool,
    bulk_delay_ms: AtomicUsize,
    pub gets: AtomicUsize,
    pub bulk_gets: AtomicUsize,
    read_gate: Mutex<Option<Arc<ReadGate>>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bulk_delay(&self, delay: Duration) {
        let millis = usize::try_from(delay.as_millis()).unwrap_or(usize::MAX);
        self.bulk_delay_ms.store(millis, Ordering::SeqCst);
    }

    pub fn fail(flag: &AtomicBool, on: bool) {
        flag.store(on, Ordering::SeqCst);
    }

    /// Gates the next `get`: it reads the document, signals `entered` and
    /// waits for `release` before returning it.
    pub fn gate_next_read(&self) -> Arc<ReadGate> {
        let gate = Arc::new(ReadGate::default());
        *self.read_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Seeds a document directly, bypassing any DAO cache.
    pub async fn seed(&self, bean: &Bean) {
        let document = serde_json::to_string(bean).unwrap();
        self.inner.put(Bean::COLLECTION, &bean.key, &document).await.unwrap();
    }
}

#[async_trait]
impl RemoteStore for FlakyStore {
    async fn get(&self, collection: &str, key: &str) -> SnipResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SnipError::store_read("connection reset"));
        }
        let document = self.inner.get(collection, key).await;
        let gate = self.read_gate.lock().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        document
    }

    async fn get_many(
        &self,
        collection: &str,
        keys: &[String],
    ) -> SnipResult<HashMap<String, String>> {
        self.bulk_gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SnipError::store_read("connection reset"));
        }
        // Documents are fetched before the delay, so they can go stale.
        let documents = self.inner.get_many(collection, keys).await;
        let delay = self.bulk_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }
        documents
    }

    async fn put(&self, collection: &str, key: &str, value: &str) -> SnipResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SnipError::store_write("write rejected"));
        }
        self.inner.put(collection, key, value).await
    }

    async fn delete(&self, collection: &str, key: &str) -> SnipResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SnipError::store_write("delete rejected"));
        }
        self.inner.delete(collection, key).await
    }

    async fn list_keys(&self, collection: &str, limit: usize) -> SnipResult<Vec<String>> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(SnipError::store_read("list unavailable"));
        }
        self.inner.list_keys(collection, limit).await
    }
}
