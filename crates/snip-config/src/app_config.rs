//! Application configuration structures.

use crate::StoreBackend;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Persistence backend selection.
    #[serde(default)]
    pub store: StoreConfig,

    /// Redis configuration.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Local cache configuration for remote-backed collections.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Accounts created on first start.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "mysnip".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend holding the collections.
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Redis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis URL.
    pub url: String,
    /// Connection pool size.
    pub pool_size: usize,
    /// Prefix of the hash holding each collection.
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
            key_prefix: "mysnip".to_string(),
        }
    }
}

/// Cache configuration for remote-backed collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries held per collection.
    pub max_capacity: u64,
    /// Entries untouched for this long are dropped.
    pub idle_expiry_secs: u64,
    /// Maximum number of keys listed when loading a whole collection.
    pub list_limit: usize,
    /// How long a full listing waits for the cache to be primed.
    pub prime_timeout_ms: u64,
    /// Delay before the first statistics report.
    pub stats_initial_delay_secs: u64,
    /// Interval between statistics reports.
    pub stats_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            idle_expiry_secs: 600,
            list_limit: 100,
            prime_timeout_ms: 10_000,
            stats_initial_delay_secs: 3,
            stats_interval_secs: 30,
        }
    }
}

impl CacheConfig {
    /// Returns the idle expiry as a Duration.
    #[must_use]
    pub const fn idle_expiry(&self) -> Duration {
        Duration::from_secs(self.idle_expiry_secs)
    }

    /// Returns the priming timeout as a Duration.
    #[must_use]
    pub const fn prime_timeout(&self) -> Duration {
        Duration::from_millis(self.prime_timeout_ms)
    }

    /// Returns the delay before the first statistics report.
    #[must_use]
    pub const fn stats_initial_delay(&self) -> Duration {
        Duration::from_secs(self.stats_initial_delay_secs)
    }

    /// Returns the statistics reporting interval.
    #[must_use]
    pub const fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }
}

/// Accounts created when the server starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Create the admin account if it does not exist.
    pub enabled: bool,
    /// Admin username.
    pub admin_username: String,
    /// Admin password, hashed before it is stored.
    pub admin_password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_username: "admin".to_string(),
            admin_password: "change-me-in-production".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,snip=debug".to_string(),
            json: false,
        }
    }
}
