//! Metrics for cache monitoring.

use crate::cache::CacheStatsSnapshot;
use metrics::{describe_gauge, gauge};

/// Metric names for the collection caches.
pub mod names {
    /// Cache hits since start.
    pub const CACHE_HITS: &str = "snip_cache_hits";
    /// Cache misses since start.
    pub const CACHE_MISSES: &str = "snip_cache_misses";
    /// Failed loads from the remote store.
    pub const CACHE_LOAD_FAILURES: &str = "snip_cache_load_failures";
    /// Entries evicted by size or idle expiry.
    pub const CACHE_EVICTIONS: &str = "snip_cache_evictions";
    /// Current number of cached entries.
    pub const CACHE_ENTRIES: &str = "snip_cache_entries";
    /// Hit ratio in `[0, 1]`.
    pub const CACHE_HIT_RATIO: &str = "snip_cache_hit_ratio";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_gauge!(names::CACHE_HITS, "Number of cache hits");
    describe_gauge!(names::CACHE_MISSES, "Number of cache misses");
    describe_gauge!(
        names::CACHE_LOAD_FAILURES,
        "Number of failed loads from the remote store"
    );
    describe_gauge!(
        names::CACHE_EVICTIONS,
        "Number of entries evicted by size or idle expiry"
    );
    describe_gauge!(names::CACHE_ENTRIES, "Current number of cached entries");
    describe_gauge!(names::CACHE_HIT_RATIO, "Cache hit ratio");
}

/// Publishes a statistics snapshot as gauges labelled by cache name.
#[allow(clippy::cast_precision_loss)]
pub fn record_snapshot(snapshot: &CacheStatsSnapshot) {
    let cache = snapshot.name.clone();
    gauge!(names::CACHE_HITS, "cache" => cache.clone()).set(snapshot.hits as f64);
    gauge!(names::CACHE_MISSES, "cache" => cache.clone()).set(snapshot.misses as f64);
    gauge!(names::CACHE_LOAD_FAILURES, "cache" => cache.clone())
        .set(snapshot.load_failures as f64);
    gauge!(names::CACHE_EVICTIONS, "cache" => cache.clone()).set(snapshot.evictions as f64);
    gauge!(names::CACHE_ENTRIES, "cache" => cache.clone()).set(snapshot.entry_count as f64);
    gauge!(names::CACHE_HIT_RATIO, "cache" => cache).set(snapshot.hit_ratio());
}
