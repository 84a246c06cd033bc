//! DAO (Data Access Object) layer.
//!
//! Every collection is reached through [`Dao`], whatever the backend:
//! ```text
//! Service → Dao<T> → CollectionDao<T> → ReadThroughCache<T> → RemoteStore
//!                  ↘ MemoryDao<T>
//! ```

mod collection_dao;
mod memory_dao;

pub use collection_dao::{CollectionDao, CollectionDaoOptions};
pub use memory_dao::MemoryDao;

use async_trait::async_trait;
use snip_core::{Entity, Filter, Interface, SnipResult};

/// Uniform CRUD and query contract over one collection.
///
/// Implementations are shared process-wide and must be safe under
/// concurrent calls.
#[async_trait]
pub trait Dao<T: Entity>: Interface + Send + Sync {
    /// Finds an entity by key. An absent key is `Ok(None)`.
    async fn find_one(&self, key: &str) -> SnipResult<Option<T>>;

    /// Returns true if `key` is present in the backing store.
    ///
    /// Unlike [`find_one`](Self::find_one), a failed read is returned
    /// rather than reported as absent, so the answer can gate a write.
    ///
    /// # Errors
    ///
    /// Fails with a store read error when presence cannot be confirmed.
    async fn exists(&self, key: &str) -> SnipResult<bool>;

    /// Returns every entity, in no particular order.
    async fn find_all(&self) -> SnipResult<Vec<T>>;

    /// Returns the entities matching `filter`, in no particular order.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when the filter names a field `T`
    /// does not have.
    async fn find(&self, filter: &Filter) -> SnipResult<Vec<T>>;

    /// Stores `entity`, replacing any previous value under its key.
    ///
    /// An empty key is replaced by a fresh one. Returns the stored entity.
    async fn save(&self, entity: T) -> SnipResult<T>;

    /// Deletes an entity by key. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> SnipResult<()>;
}

/// Component with background work tied to an explicit lifecycle.
#[async_trait]
pub trait Managed: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Starts background work.
    fn start(&self) -> SnipResult<()>;

    /// Stops background work and waits for it to finish.
    async fn shutdown(&self);
}
