//! Uncached in-memory DAO.

use super::Dao;
use async_trait::async_trait;
use parking_lot::RwLock;
use snip_core::{new_key, Entity, Filter, SnipResult};
use std::collections::HashMap;
use tracing::debug;

/// [`Dao`] holding its collection in a map. Nothing survives a restart.
pub struct MemoryDao<T> {
    entities: RwLock<HashMap<String, T>>,
}

impl<T: Entity> MemoryDao<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a collection holding `entities`.
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        let dao = Self::new();
        {
            let mut map = dao.entities.write();
            for entity in entities {
                map.insert(entity.key().to_string(), entity);
            }
        }
        dao
    }
}

impl<T: Entity> Default for MemoryDao<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Dao<T> for MemoryDao<T> {
    async fn find_one(&self, key: &str) -> SnipResult<Option<T>> {
        Ok(self.entities.read().get(key).cloned())
    }

    async fn exists(&self, key: &str) -> SnipResult<bool> {
        Ok(self.entities.read().contains_key(key))
    }

    async fn find_all(&self) -> SnipResult<Vec<T>> {
        Ok(self.entities.read().values().cloned().collect())
    }

    async fn find(&self, filter: &Filter) -> SnipResult<Vec<T>> {
        let predicate = filter.compile::<T>()?;
        Ok(self
            .entities
            .read()
            .values()
            .filter(|entity| predicate.test(entity))
            .cloned()
            .collect())
    }

    async fn save(&self, mut entity: T) -> SnipResult<T> {
        if entity.needs_key() {
            entity.set_key(new_key());
        }
        debug!(collection = T::COLLECTION, key = %entity.key(), "Saving entity");
        self.entities
            .write()
            .insert(entity.key().to_string(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &str) -> SnipResult<()> {
        self.entities.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_core::{Category, SnipError};

    #[tokio::test]
    async fn test_save_assigns_key() {
        let dao = MemoryDao::<Category>::new();
        let saved = dao.save(Category::new("Rust")).await.unwrap();
        assert!(!saved.key.is_empty());

        let found = dao.find_one(&saved.key).await.unwrap().unwrap();
        assert_eq!(found.name, "Rust");
    }

    #[tokio::test]
    async fn test_save_replaces() {
        let dao = MemoryDao::with_entities([Category::with_key("c1", "Old")]);
        dao.save(Category::with_key("c1", "New")).await.unwrap();

        let all = dao.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "New");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dao = MemoryDao::with_entities([Category::with_key("c1", "Rust")]);
        dao.delete("c1").await.unwrap();
        dao.delete("c1").await.unwrap();
        assert!(dao.find_one("c1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_with_filter() {
        let dao = MemoryDao::with_entities([
            Category::with_key("c1", "Rust"),
            Category::with_key("c2", "Go"),
        ]);

        let found = dao.find(&Filter::contains("name", "Ru")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "c1");

        let err = dao.find(&Filter::contains("colour", "x")).await.unwrap_err();
        assert!(matches!(err, SnipError::Configuration(_)));
    }
}
