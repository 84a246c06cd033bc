//! Remote key-value store contract.
//!
//! A store holds named collections of JSON documents addressed by key.
//! Operations are individually atomic per key and may be eventually
//! consistent across keys.

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

use async_trait::async_trait;
use snip_core::{Interface, SnipResult};
use std::collections::HashMap;

/// Client for a remote collection store.
#[async_trait]
pub trait RemoteStore: Interface + Send + Sync {
    /// Fetches one document, `None` when the key is absent.
    async fn get(&self, collection: &str, key: &str) -> SnipResult<Option<String>>;

    /// Fetches several documents in one round trip. Absent keys are
    /// omitted from the result.
    async fn get_many(
        &self,
        collection: &str,
        keys: &[String],
    ) -> SnipResult<HashMap<String, String>> {
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.get(collection, key).await? {
                found.insert(key.clone(), value);
            }
        }
        Ok(found)
    }

    /// Stores a document, replacing any previous value.
    async fn put(&self, collection: &str, key: &str, value: &str) -> SnipResult<()>;

    /// Removes a document. Removing an absent key succeeds.
    async fn delete(&self, collection: &str, key: &str) -> SnipResult<()>;

    /// Lists at most `limit` keys of a collection without their values.
    async fn list_keys(&self, collection: &str, limit: usize) -> SnipResult<Vec<String>>;
}
