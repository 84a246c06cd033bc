//! Local read/write-through cache over a pluggable source.
//!
//! The cache is a view of the source, never the source of truth: any entry
//! may be evicted at any time and is re-derived through
//! [`CacheSource::load`] on the next read.

mod read_through;
mod reporter;
mod source;
mod stats;

pub use read_through::{CacheOptions, ReadThroughCache};
pub use reporter::{StatsReporter, StatsSource};
pub use source::{CacheSource, StoreSource};
pub use stats::{CacheStats, CacheStatsSnapshot};
