//! Loader/writer seam between the cache engine and a backend.

use crate::store::RemoteStore;
use async_trait::async_trait;
use snip_core::{Entity, SnipError, SnipResult};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;

/// Backend consulted by [`ReadThroughCache`](super::ReadThroughCache) on
/// misses and mutations.
#[async_trait]
pub trait CacheSource<V: Send + Sync + 'static>: Send + Sync {
    /// Loads one value, `None` when absent.
    async fn load(&self, key: &str) -> SnipResult<Option<V>>;

    /// Loads several values at once. Absent keys are omitted.
    async fn load_all(&self, keys: &[String]) -> SnipResult<Vec<(String, V)>>;

    /// Persists a value.
    async fn write(&self, key: &str, value: &V) -> SnipResult<()>;

    /// Removes a value. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> SnipResult<()>;
}

/// [`CacheSource`] storing entities of `T::COLLECTION` as JSON documents.
pub struct StoreSource<T> {
    store: Arc<dyn RemoteStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> StoreSource<T> {
    /// Binds the entity type to a store.
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Lists up to `limit` keys of the collection.
    pub async fn list_keys(&self, limit: usize) -> SnipResult<Vec<String>> {
        self.store.list_keys(T::COLLECTION, limit).await
    }

    fn decode(key: &str, document: &str) -> SnipResult<T> {
        serde_json::from_str(document).map_err(|e| {
            SnipError::store_read(format!(
                "Corrupt {} document '{key}': {e}",
                T::COLLECTION
            ))
        })
    }
}

#[async_trait]
impl<T: Entity> CacheSource<T> for StoreSource<T> {
    async fn load(&self, key: &str) -> SnipResult<Option<T>> {
        match self.store.get(T::COLLECTION, key).await? {
            Some(document) => Self::decode(key, &document).map(Some),
            None => Ok(None),
        }
    }

    async fn load_all(&self, keys: &[String]) -> SnipResult<Vec<(String, T)>> {
        let documents = self.store.get_many(T::COLLECTION, keys).await?;
        let mut loaded = Vec::with_capacity(documents.len());
        for (key, document) in documents {
            match Self::decode(&key, &document) {
                Ok(entity) => loaded.push((key, entity)),
                Err(e) => warn!(collection = T::COLLECTION, key = %key, error = %e, "Skipping document"),
            }
        }
        Ok(loaded)
    }

    async fn write(&self, key: &str, value: &T) -> SnipResult<()> {
        let document = serde_json::to_string(value)?;
        self.store.put(T::COLLECTION, key, &document).await
    }

    async fn delete(&self, key: &str) -> SnipResult<()> {
        self.store.delete(T::COLLECTION, key).await
    }
}
