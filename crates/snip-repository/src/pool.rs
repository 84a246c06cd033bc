//! Redis connection pool management.

use deadpool_redis::{Config, Pool, Runtime};
use snip_config::RedisConfig;
use snip_core::{SnipError, SnipResult};
use tracing::{info, warn};

/// Creates a Redis connection pool and checks that the server answers.
pub async fn create_redis_pool(config: &RedisConfig) -> SnipResult<Pool> {
    info!("Creating Redis connection pool...");

    let pool = Config::from_url(&config.url)
        .builder()
        .map_err(|e| SnipError::configuration(format!("Invalid Redis config: {e}")))?
        .max_size(config.pool_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| SnipError::configuration(format!("Failed to create pool: {e}")))?;

    let mut conn = pool.get().await.map_err(|e| {
        warn!("Failed to connect to Redis: {}", e);
        SnipError::store_read(format!("Failed to connect: {e}"))
    })?;
    redis::cmd("PING")
        .query_async::<String>(&mut *conn)
        .await
        .map_err(|e| SnipError::store_read(format!("Redis PING failed: {e}")))?;

    info!("Redis connection pool created successfully");
    Ok(pool)
}
