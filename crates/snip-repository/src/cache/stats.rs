//! Cache statistics counters.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters updated by the cache on every operation.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    load_failures: AtomicU64,
    puts: AtomicU64,
    removals: AtomicU64,
    evictions: AtomicU64,
    prime_timeouts: AtomicU64,
}

impl CacheStats {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_misses(&self, count: u64) {
        self.misses.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_put(&self) {
        self.puts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_prime_timeout(&self) {
        self.prime_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Captures the current counter values.
    #[must_use]
    pub fn snapshot(&self, name: &str, entry_count: u64) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            name: name.to_string(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            prime_timeouts: self.prime_timeouts.load(Ordering::Relaxed),
            entry_count,
        }
    }
}

/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatsSnapshot {
    /// Cache name, the collection for DAO caches.
    pub name: String,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that went to the source, including coalesced waits and primed keys.
    pub misses: u64,
    /// Single or bulk loads that failed and read as absent.
    pub load_failures: u64,
    /// Successful write-through puts.
    pub puts: u64,
    /// Successful write-through removals.
    pub removals: u64,
    /// Entries dropped for size or idle expiry.
    pub evictions: u64,
    /// Priming runs that outlived their timeout.
    pub prime_timeouts: u64,
    /// Entries held when the snapshot was taken.
    pub entry_count: u64,
}

impl CacheStatsSnapshot {
    /// Hits divided by lookups, `1.0` before the first lookup.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            1.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

impl fmt::Display for CacheStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: hits={} misses={} hitRatio={:.3} loadFailures={} evictions={} entries={}",
            self.name,
            self.hits,
            self.misses,
            self.hit_ratio(),
            self.load_failures,
            self.evictions,
            self.entry_count
        )
    }
}
