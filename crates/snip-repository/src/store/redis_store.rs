//! Redis-backed store: one hash per collection.

use super::RemoteStore;
use async_trait::async_trait;
use deadpool_redis::{Connection, Pool};
use snip_core::{SnipError, SnipResult};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use tracing::debug;

/// Upper bound on the `COUNT` hint of one `HSCAN` round trip.
const SCAN_BATCH: usize = 500;

/// [`RemoteStore`] on Redis hashes.
///
/// Collection `Snippet` with prefix `mysnip` lives in the hash
/// `mysnip:Snippet`, one field per document key.
pub struct RedisStore {
    pool: Pool,
    prefix: String,
}

impl RedisStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: Pool, prefix: impl Into<String>) -> Self {
        Self {
            pool,
            prefix: prefix.into(),
        }
    }

    /// Name of the hash holding a collection.
    #[must_use]
    pub fn hash_key(&self, collection: &str) -> String {
        format!("{}:{}", self.prefix, collection)
    }

    async fn conn(&self, on_error: fn(String) -> SnipError) -> SnipResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| on_error(format!("Redis pool unavailable: {e}")))
    }
}

fn read_error(e: impl Display) -> SnipError {
    SnipError::store_read(e.to_string())
}

fn write_error(e: impl Display) -> SnipError {
    SnipError::store_write(e.to_string())
}

#[async_trait]
impl RemoteStore for RedisStore {
    async fn get(&self, collection: &str, key: &str) -> SnipResult<Option<String>> {
        let mut conn = self.conn(SnipError::StoreRead).await?;
        redis::cmd("HGET")
            .arg(self.hash_key(collection))
            .arg(key)
            .query_async::<Option<String>>(&mut *conn)
            .await
            .map_err(read_error)
    }

    async fn get_many(
        &self,
        collection: &str,
        keys: &[String],
    ) -> SnipResult<HashMap<String, String>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.conn(SnipError::StoreRead).await?;
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(self.hash_key(collection))
            .arg(keys)
            .query_async(&mut *conn)
            .await
            .map_err(read_error)?;

        debug!(collection, requested = keys.len(), "Bulk fetch from Redis");

        Ok(keys
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|v| (key.clone(), v)))
            .collect())
    }

    async fn put(&self, collection: &str, key: &str, value: &str) -> SnipResult<()> {
        let mut conn = self.conn(SnipError::StoreWrite).await?;
        redis::cmd("HSET")
            .arg(self.hash_key(collection))
            .arg(key)
            .arg(value)
            .query_async::<i64>(&mut *conn)
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> SnipResult<()> {
        let mut conn = self.conn(SnipError::StoreWrite).await?;
        redis::cmd("HDEL")
            .arg(self.hash_key(collection))
            .arg(key)
            .query_async::<i64>(&mut *conn)
            .await
            .map_err(write_error)?;
        Ok(())
    }

    async fn list_keys(&self, collection: &str, limit: usize) -> SnipResult<Vec<String>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let hash = self.hash_key(collection);
        let mut conn = self.conn(SnipError::StoreRead).await?;
        let mut keys = Vec::with_capacity(limit.min(SCAN_BATCH));
        let mut seen = HashSet::new();
        let mut cursor = 0_u64;

        loop {
            let (next, reply): (u64, Vec<String>) = redis::cmd("HSCAN")
                .arg(&hash)
                .arg(cursor)
                .arg("COUNT")
                .arg(SCAN_BATCH.min(limit))
                .query_async(&mut *conn)
                .await
                .map_err(read_error)?;
            collect_fields(reply, &mut keys, &mut seen, limit);
            if next == 0 || keys.len() >= limit {
                break;
            }
            cursor = next;
        }

        debug!(collection, listed = keys.len(), limit, "Listed keys from Redis");
        Ok(keys)
    }
}

/// Appends the fields of an `HSCAN` reply (field, value, field, value, ...)
/// until `keys` holds `limit` entries. HSCAN may repeat a field.
fn collect_fields(
    reply: Vec<String>,
    keys: &mut Vec<String>,
    seen: &mut HashSet<String>,
    limit: usize,
) {
    for field in reply.into_iter().step_by(2) {
        if keys.len() >= limit {
            break;
        }
        if seen.insert(field.clone()) {
            keys.push(field);
        }
    }
}
