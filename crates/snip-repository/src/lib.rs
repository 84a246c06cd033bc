//! # MySnip Repository
//!
//! Data access for every collection, behind one contract:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn Dao<T>>
//! CollectionDao<T>              (cache-backed DAO)
//!   ↓  ReadThroughCache<T>      (moka, idle expiry, statistics)
//!   ↓  Arc<dyn CacheSource<T>>  (load / load_all / write / delete)
//! StoreSource<T>
//!   ↓  Arc<dyn RemoteStore>
//! RedisStore | MemoryStore
//! ```
//!
//! [`MemoryDao`] skips the cache entirely and is used for development.

pub mod cache;
pub mod dao;
pub mod metrics;
pub mod pool;
pub mod store;

pub use cache::*;
pub use dao::*;
pub use pool::*;
pub use store::*;
