//! Process-local store.

use super::RemoteStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use snip_core::SnipResult;
use std::collections::HashMap;

type Collections = HashMap<String, HashMap<String, String>>;

/// [`RemoteStore`] kept in process memory.
///
/// Behaves like a remote store from the cache's point of view, which makes
/// it the default backend for development and tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, HashMap::len)
    }

    /// Returns true if the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> SnipResult<Option<String>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn get_many(
        &self,
        collection: &str,
        keys: &[String],
    ) -> SnipResult<HashMap<String, String>> {
        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(HashMap::new());
        };
        Ok(keys
            .iter()
            .filter_map(|key| docs.get(key).map(|value| (key.clone(), value.clone())))
            .collect())
    }

    async fn put(&self, collection: &str, key: &str, value: &str) -> SnipResult<()> {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> SnipResult<()> {
        if let Some(docs) = self.collections.write().get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn list_keys(&self, collection: &str, limit: usize) -> SnipResult<Vec<String>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| docs.keys().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new();
        store.put("Category", "c1", "{}").await.unwrap();

        assert_eq!(store.get("Category", "c1").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get("Snippet", "c1").await.unwrap(), None);

        store.delete("Category", "c1").await.unwrap();
        store.delete("Category", "c1").await.unwrap();
        assert!(store.is_empty("Category"));
    }

    #[tokio::test]
    async fn test_get_many_omits_absent_keys() {
        let store = MemoryStore::new();
        store.put("Category", "a", "1").await.unwrap();
        store.put("Category", "b", "2").await.unwrap();

        let keys = vec!["a".to_string(), "x".to_string(), "b".to_string()];
        let found = store.get_many("Category", &keys).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found["b"], "2");
    }

    #[tokio::test]
    async fn test_list_keys_respects_limit() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.put("Snippet", &i.to_string(), "{}").await.unwrap();
        }

        assert_eq!(store.list_keys("Snippet", 3).await.unwrap().len(), 3);
        assert_eq!(store.list_keys("Snippet", 10).await.unwrap().len(), 5);
        assert!(store.list_keys("Missing", 10).await.unwrap().is_empty());
    }
}
