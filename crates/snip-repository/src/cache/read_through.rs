//! Read-through / write-through cache engine.

use super::{CacheSource, CacheStats, CacheStatsSnapshot, StatsSource};
use async_trait::async_trait;
use moka::future::Cache;
use moka::Entry;
use snip_core::SnipResult;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

const WRITE_STRIPES: u64 = 64;

/// Write counters striped by key hash.
///
/// A load only caches its result if the counter of its key did not move
/// while it ran. Keys sharing a stripe can skip caching a load, never
/// cache a stale one.
struct WriteGenerations {
    stripes: Vec<AtomicU64>,
}

impl WriteGenerations {
    fn new() -> Self {
        Self {
            stripes: (0..WRITE_STRIPES).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    fn slot(&self, key: &str) -> &AtomicU64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = usize::try_from(hasher.finish() % WRITE_STRIPES).unwrap_or_default();
        &self.stripes[index]
    }

    fn current(&self, key: &str) -> u64 {
        self.slot(key).load(Ordering::SeqCst)
    }

    fn bump(&self, key: &str) {
        self.slot(key).fetch_add(1, Ordering::SeqCst);
    }
}

/// Sizing and expiry of a [`ReadThroughCache`].
#[derive(Debug, Clone, Copy)]
pub struct CacheOptions {
    /// Upper bound on cached entries.
    pub max_capacity: u64,
    /// Entries not read or written for this long are dropped.
    pub idle_expiry: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            idle_expiry: Duration::from_secs(600),
        }
    }
}

/// Bounded, idle-expiring cache that loads misses from and writes
/// mutations through to a [`CacheSource`].
///
/// Concurrent misses on the same key are coalesced into a single load.
/// Read failures are logged and reported as absent; write failures are
/// returned to the caller and leave the cache untouched. A load that
/// overlaps a write to its key is handed to its caller but not cached.
pub struct ReadThroughCache<V: Clone + Send + Sync + 'static> {
    name: String,
    cache: Cache<String, V>,
    source: Arc<dyn CacheSource<V>>,
    stats: Arc<CacheStats>,
    generations: Arc<WriteGenerations>,
}

impl<V: Clone + Send + Sync + 'static> ReadThroughCache<V> {
    /// Creates an empty cache in front of `source`.
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn CacheSource<V>>,
        options: CacheOptions,
    ) -> Self {
        let name = name.into();
        let stats = Arc::new(CacheStats::default());
        let listener_stats = Arc::clone(&stats);

        let cache = Cache::builder()
            .name(&name)
            .max_capacity(options.max_capacity)
            .time_to_idle(options.idle_expiry)
            .eviction_listener(move |_key, _value, cause| {
                if cause.was_evicted() {
                    listener_stats.record_eviction();
                }
            })
            .build();

        Self {
            name,
            cache,
            source,
            stats,
            generations: Arc::new(WriteGenerations::new()),
        }
    }

    /// Cache name, used in logs and metrics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cached value, loading it from the source on a miss.
    ///
    /// Callers that wait on another caller's load count as misses.
    pub async fn get(&self, key: &str) -> Option<V> {
        if let Some(value) = self.cache.get(key).await {
            self.stats.record_hit();
            return Some(value);
        }

        let generation = self.generations.current(key);
        let mut uncached = None;
        let load = async {
            let loaded = match self.source.load(key).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(cache = %self.name, key, error = %e, "Read-through load failed");
                    self.stats.record_load_failure();
                    None
                }
            };
            if self.generations.current(key) == generation {
                loaded
            } else {
                debug!(cache = %self.name, key, "Key written during load, result not cached");
                uncached = loaded;
                None
            }
        };

        let entry = self.cache.entry_by_ref(key).or_optionally_insert_with(load).await;
        self.stats.record_misses(1);
        entry.map(Entry::into_value).or(uncached)
    }

    /// Writes `value` to the source, then caches it.
    ///
    /// # Errors
    ///
    /// Returns the source's error; the cache is not updated in that case.
    pub async fn put(&self, key: String, value: V) -> SnipResult<()> {
        self.generations.bump(&key);
        let written = self.source.write(&key, &value).await;
        self.generations.bump(&key);
        written?;
        self.cache.insert(key, value).await;
        self.stats.record_put();
        Ok(())
    }

    /// Deletes `key` from the source, then from the cache.
    ///
    /// # Errors
    ///
    /// Returns the source's error; the cached entry is kept in that case.
    pub async fn remove(&self, key: &str) -> SnipResult<()> {
        self.generations.bump(key);
        let deleted = self.source.delete(key).await;
        self.generations.bump(key);
        deleted?;
        self.cache.invalidate(key).await;
        self.stats.record_removal();
        Ok(())
    }

    /// Bulk-loads the given keys that are not cached yet.
    ///
    /// The load runs on its own task. If it does not finish within
    /// `timeout` this returns `false` and the load keeps filling the cache
    /// in the background. Load failures are logged and also yield `false`.
    pub async fn prime(&self, keys: Vec<String>, timeout: Duration) -> bool {
        let missing: Vec<String> = keys
            .into_iter()
            .filter(|key| !self.cache.contains_key(key))
            .collect();
        if missing.is_empty() {
            return true;
        }

        debug!(cache = %self.name, missing = missing.len(), "Priming cache");
        self.stats.record_misses(missing.len() as u64);

        let expected: HashMap<String, u64> = missing
            .iter()
            .map(|key| (key.clone(), self.generations.current(key)))
            .collect();
        let source = Arc::clone(&self.source);
        let cache = self.cache.clone();
        let stats = Arc::clone(&self.stats);
        let generations = Arc::clone(&self.generations);
        let name = self.name.clone();

        let task = tokio::spawn(async move {
            match source.load_all(&missing).await {
                Ok(loaded) => {
                    for (key, value) in loaded {
                        // Keys written or deleted during the load keep the writer's state.
                        if expected.get(&key) != Some(&generations.current(&key)) {
                            continue;
                        }
                        cache.entry(key).or_insert(value).await;
                    }
                    true
                }
                Err(e) => {
                    warn!(cache = %name, error = %e, "Bulk load failed");
                    stats.record_load_failure();
                    false
                }
            }
        });

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(completed)) => completed,
            Ok(Err(e)) => {
                error!(cache = %self.name, error = %e, "Priming task failed");
                false
            }
            Err(_) => {
                warn!(
                    cache = %self.name,
                    timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    "Priming timed out, continuing with cached entries"
                );
                self.stats.record_prime_timeout();
                false
            }
        }
    }

    /// All currently cached values, in no particular order.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.cache.iter().map(|(_, value)| value).collect()
    }

    /// Returns true if `key` is cached, without touching the source.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Applies pending evictions and expirations.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Counters plus the current entry count.
    pub async fn snapshot(&self) -> CacheStatsSnapshot {
        self.cache.run_pending_tasks().await;
        self.stats.snapshot(&self.name, self.cache.entry_count())
    }
}

#[async_trait]
impl<V: Clone + Send + Sync + 'static> StatsSource for ReadThroughCache<V> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn snapshot(&self) -> CacheStatsSnapshot {
        ReadThroughCache::snapshot(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use snip_core::SnipError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use tokio::sync::Notify;

    /// Holds the next single-key load after it has read its value.
    #[derive(Default)]
    struct LoadGate {
        entered: Notify,
        release: Notify,
    }

    #[derive(Default)]
    struct MapSource {
        values: Mutex<HashMap<String, String>>,
        loads: AtomicUsize,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
        gate: Mutex<Option<Arc<LoadGate>>>,
    }

    impl MapSource {
        fn gate_next_load(&self) -> Arc<LoadGate> {
            let gate = Arc::new(LoadGate::default());
            *self.gate.lock() = Some(Arc::clone(&gate));
            gate
        }
    }

    #[async_trait]
    impl CacheSource<String> for MapSource {
        async fn load(&self, key: &str) -> SnipResult<Option<String>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(SnipError::store_read("down"));
            }
            let value = self.values.lock().get(key).cloned();
            let gate = self.gate.lock().take();
            if let Some(gate) = gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            Ok(value)
        }

        async fn load_all(&self, keys: &[String]) -> SnipResult<Vec<(String, String)>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(SnipError::store_read("down"));
            }
            let values = self.values.lock();
            Ok(keys
                .iter()
                .filter_map(|k| values.get(k).map(|v| (k.clone(), v.clone())))
                .collect())
        }

        async fn write(&self, key: &str, value: &String) -> SnipResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(SnipError::store_write("rejected"));
            }
            self.values.lock().insert(key.to_string(), value.clone());
            Ok(())
        }

        async fn delete(&self, key: &str) -> SnipResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(SnipError::store_write("rejected"));
            }
            self.values.lock().remove(key);
            Ok(())
        }
    }

    fn cache(source: &Arc<MapSource>) -> ReadThroughCache<String> {
        ReadThroughCache::new("test", source.clone(), CacheOptions::default())
    }

    #[tokio::test]
    async fn test_miss_loads_then_hits() {
        let source = Arc::new(MapSource::default());
        source.values.lock().insert("a".into(), "1".into());
        let cache = cache(&source);

        assert_eq!(cache.get("a").await.as_deref(), Some("1"));
        assert_eq!(cache.get("a").await.as_deref(), Some("1"));
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.entry_count, 1);
    }

    #[tokio::test]
    async fn test_absent_is_not_cached() {
        let source = Arc::new(MapSource::default());
        let cache = cache(&source);

        assert!(cache.get("nope").await.is_none());
        assert!(cache.get("nope").await.is_none());
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_load_failure_reads_as_absent() {
        let source = Arc::new(MapSource::default());
        source.fail_reads.store(true, Ordering::SeqCst);
        let cache = cache(&source);

        assert!(cache.get("a").await.is_none());
        assert_eq!(cache.snapshot().await.load_failures, 1);
    }

    #[tokio::test]
    async fn test_failed_put_leaves_cache_untouched() {
        let source = Arc::new(MapSource::default());
        let cache = cache(&source);
        cache.put("a".into(), "old".into()).await.unwrap();

        source.fail_writes.store(true, Ordering::SeqCst);
        let err = cache.put("a".into(), "new".into()).await.unwrap_err();
        assert!(matches!(err, SnipError::StoreWrite(_)));
        assert_eq!(cache.get("a").await.as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_entry() {
        let source = Arc::new(MapSource::default());
        let cache = cache(&source);
        cache.put("a".into(), "1".into()).await.unwrap();

        source.fail_writes.store(true, Ordering::SeqCst);
        assert!(cache.remove("a").await.is_err());
        assert!(cache.contains("a"));

        source.fail_writes.store(false, Ordering::SeqCst);
        cache.remove("a").await.unwrap();
        assert!(!cache.contains("a"));
        assert!(source.values.lock().is_empty());
    }

    #[tokio::test]
    async fn test_prime_loads_only_missing_keys() {
        let source = Arc::new(MapSource::default());
        let cache = cache(&source);
        cache.put("a".into(), "cached".into()).await.unwrap();
        source.values.lock().insert("a".into(), "remote".into());
        source.values.lock().insert("b".into(), "2".into());

        let keys = vec!["a".to_string(), "b".to_string()];
        assert!(cache.prime(keys, Duration::from_secs(1)).await);

        let mut values = cache.values();
        values.sort();
        assert_eq!(values, vec!["2".to_string(), "cached".to_string()]);
    }

    #[tokio::test]
    async fn test_prime_failure_is_not_fatal() {
        let source = Arc::new(MapSource::default());
        let cache = cache(&source);
        source.fail_reads.store(true, Ordering::SeqCst);

        assert!(!cache.prime(vec!["a".into()], Duration::from_secs(1)).await);
        assert!(cache.values().is_empty());
    }

    #[tokio::test]
    async fn test_size_eviction_is_counted() {
        let source = Arc::new(MapSource::default());
        let options = CacheOptions {
            max_capacity: 1,
            ..CacheOptions::default()
        };
        let cache = ReadThroughCache::new("tiny", source.clone(), options);
        for i in 0..4 {
            cache.put(i.to_string(), i.to_string()).await.unwrap();
            cache.run_pending_tasks().await;
        }

        let snapshot = cache.snapshot().await;
        assert!(snapshot.entry_count <= 1);
        assert!(snapshot.evictions >= 1);
    }

    #[tokio::test]
    async fn test_load_overlapping_put_is_not_cached() {
        let source = Arc::new(MapSource::default());
        source.values.lock().insert("a".into(), "old".into());
        let gate = source.gate_next_load();
        let cache = Arc::new(cache(&source));

        let reader = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get("a").await })
        };
        gate.entered.notified().await;

        cache.put("a".into(), "new".into()).await.unwrap();
        gate.release.notify_one();

        assert_eq!(reader.await.unwrap().as_deref(), Some("old"));
        assert_eq!(cache.get("a").await.as_deref(), Some("new"));
        assert_eq!(source.values.lock().get("a").map(String::as_str), Some("new"));
    }

    #[tokio::test]
    async fn test_load_overlapping_remove_does_not_resurrect() {
        let source = Arc::new(MapSource::default());
        source.values.lock().insert("a".into(), "old".into());
        let gate = source.gate_next_load();
        let cache = Arc::new(cache(&source));

        let reader = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get("a").await })
        };
        gate.entered.notified().await;

        cache.remove("a").await.unwrap();
        gate.release.notify_one();

        assert_eq!(reader.await.unwrap().as_deref(), Some("old"));
        assert!(!cache.contains("a"));
        assert!(cache.get("a").await.is_none());
    }

    #[tokio::test]
    async fn test_coalesced_wait_counts_as_miss() {
        let source = Arc::new(MapSource::default());
        source.values.lock().insert("a".into(), "1".into());
        let gate = source.gate_next_load();
        let cache = Arc::new(cache(&source));

        let first = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get("a").await })
        };
        gate.entered.notified().await;
        let second = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get("a").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        gate.release.notify_one();

        assert_eq!(first.await.unwrap().as_deref(), Some("1"));
        assert_eq!(second.await.unwrap().as_deref(), Some("1"));
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.misses, 2);
        assert_eq!(snapshot.hits, 0);
    }
}
