//! Cache-backed DAO over a remote collection store.

use super::{Dao, Managed};
use crate::cache::{
    CacheOptions, CacheSource, CacheStatsSnapshot, ReadThroughCache, StatsReporter, StoreSource,
};
use crate::store::RemoteStore;
use async_trait::async_trait;
use snip_config::CacheConfig;
use snip_core::{new_key, Entity, Filter, SnipResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tuning for a [`CollectionDao`].
#[derive(Debug, Clone, Copy)]
pub struct CollectionDaoOptions {
    /// Cache sizing and idle expiry.
    pub cache: CacheOptions,
    /// Maximum number of keys listed by `find_all`.
    pub list_limit: usize,
    /// How long `find_all` waits for priming.
    pub prime_timeout: Duration,
    /// Delay before the first statistics report.
    pub stats_initial_delay: Duration,
    /// Interval between statistics reports.
    pub stats_interval: Duration,
}

impl Default for CollectionDaoOptions {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for CollectionDaoOptions {
    fn from(config: &CacheConfig) -> Self {
        Self {
            cache: CacheOptions {
                max_capacity: config.max_capacity,
                idle_expiry: config.idle_expiry(),
            },
            list_limit: config.list_limit,
            prime_timeout: config.prime_timeout(),
            stats_initial_delay: config.stats_initial_delay(),
            stats_interval: config.stats_interval(),
        }
    }
}

/// [`Dao`] reading through and writing through a local cache.
///
/// * `find_one` serves from the cache and loads misses from the store.
/// * `find_all` lists up to `list_limit` keys, bulk-loads the ones not yet
///   cached and waits at most `prime_timeout` before answering from the cache.
/// * `find` filters the cached entities without a remote round trip.
/// * `save` and `delete` reach the store before they return; store failures
///   are returned to the caller.
///
/// Read failures never surface: they are logged and read as absent.
pub struct CollectionDao<T: Entity> {
    source: Arc<StoreSource<T>>,
    cache: Arc<ReadThroughCache<T>>,
    reporter: StatsReporter,
    options: CollectionDaoOptions,
}

impl<T: Entity> CollectionDao<T> {
    /// Creates a DAO over `T::COLLECTION` in `store`.
    ///
    /// Statistics reporting begins with [`Managed::start`].
    pub fn new(store: Arc<dyn RemoteStore>, options: CollectionDaoOptions) -> Self {
        let source = Arc::new(StoreSource::<T>::new(store));
        let loader: Arc<dyn CacheSource<T>> = source.clone();
        let cache = Arc::new(ReadThroughCache::new(T::COLLECTION, loader, options.cache));
        let reporter = StatsReporter::new(
            cache.clone(),
            options.stats_initial_delay,
            options.stats_interval,
        );

        Self {
            source,
            cache,
            reporter,
            options,
        }
    }

    /// Creates a DAO tuned from the cache configuration section.
    pub fn from_config(store: Arc<dyn RemoteStore>, config: &CacheConfig) -> Self {
        Self::new(store, CollectionDaoOptions::from(config))
    }

    /// Current cache statistics.
    pub async fn stats(&self) -> CacheStatsSnapshot {
        self.cache.snapshot().await
    }

    /// Returns true if the statistics reporter is running.
    #[must_use]
    pub fn is_reporting(&self) -> bool {
        self.reporter.is_running()
    }

    /// Returns true if `key` is currently cached.
    #[must_use]
    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.contains(key)
    }
}

#[async_trait]
impl<T: Entity> Dao<T> for CollectionDao<T> {
    async fn find_one(&self, key: &str) -> SnipResult<Option<T>> {
        Ok(self.cache.get(key).await)
    }

    async fn exists(&self, key: &str) -> SnipResult<bool> {
        if self.cache.contains(key) {
            return Ok(true);
        }
        Ok(self.source.load(key).await?.is_some())
    }

    async fn find_all(&self) -> SnipResult<Vec<T>> {
        let limit = self.options.list_limit;
        match self.source.list_keys(limit).await {
            Ok(keys) => {
                if keys.len() >= limit {
                    warn!(
                        collection = T::COLLECTION,
                        limit, "Key listing hit the configured limit, results may be incomplete"
                    );
                }
                self.cache.prime(keys, self.options.prime_timeout).await;
            }
            Err(e) => {
                warn!(
                    collection = T::COLLECTION,
                    error = %e,
                    "Listing keys failed, answering from cache"
                );
            }
        }
        Ok(self.cache.values())
    }

    async fn find(&self, filter: &Filter) -> SnipResult<Vec<T>> {
        let predicate = filter.compile::<T>()?;
        debug!(collection = T::COLLECTION, filter = %filter, "Filtering cached entities");
        Ok(self
            .cache
            .values()
            .into_iter()
            .filter(|entity| predicate.test(entity))
            .collect())
    }

    async fn save(&self, mut entity: T) -> SnipResult<T> {
        if entity.needs_key() {
            entity.set_key(new_key());
        }
        let key = entity.key().to_string();
        debug!(collection = T::COLLECTION, key = %key, "Saving entity");
        self.cache.put(key, entity.clone()).await?;
        Ok(entity)
    }

    async fn delete(&self, key: &str) -> SnipResult<()> {
        debug!(collection = T::COLLECTION, key, "Deleting entity");
        self.cache.remove(key).await
    }
}

#[async_trait]
impl<T: Entity> Managed for CollectionDao<T> {
    fn name(&self) -> &str {
        T::COLLECTION
    }

    fn start(&self) -> SnipResult<()> {
        info!(collection = T::COLLECTION, "Starting collection DAO");
        self.reporter.start()
    }

    async fn shutdown(&self) {
        self.reporter.stop().await;
        info!(collection = T::COLLECTION, "Collection DAO stopped");
    }
}
