//! Key/value cache with TTL used by the repositories.
//!
//! Two backends share one contract: [`RedisCacheService`] for deployments
//! and [`InMemoryCache`] for tests and local runs. The `read`/`write`/`evict`
//! helpers bound every call by the operation timeout and absorb backend
//! failures so repository code never sees them.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCache;
pub use redis_cache::{RedisCacheService, DEFAULT_TTL};

use inkpress_config::CacheConfig;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

/// Default bound on a single cache operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(500);

/// Cache policy shared by the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Lifetime of every entry written.
    pub ttl: Duration,
    /// Maximum concurrent detail lookups when resolving a cached page.
    pub lookup_concurrency: usize,
    /// Longest a single cache operation may take before it is abandoned.
    pub operation_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            lookup_concurrency: 8,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

impl From<&CacheConfig> for CacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            lookup_concurrency: config.lookup_concurrency.max(1),
            operation_timeout: config.operation_timeout(),
        }
    }
}

/// Reads a typed entry. Misses, backend errors, timeouts and undecodable values all yield `None`.
pub(crate) async fn read<T>(cache: &dyn CacheInterface, key: &str, limit: Duration) -> Option<T>
where
    T: DeserializeOwned + Send,
{
    match timeout(limit, cache.get::<T>(key)).await {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!(key, error = %e, "Cache read failed, treating as miss");
            None
        }
        Err(_) => {
            warn!(key, timeout_ms = limit.as_millis(), "Cache read timed out, treating as miss");
            None
        }
    }
}

/// Writes a typed entry, logging and ignoring failures.
pub(crate) async fn write<T>(cache: &dyn CacheInterface, key: &str, value: &T, ttl: Duration, limit: Duration)
where
    T: Serialize + Send + Sync,
{
    match timeout(limit, cache.set(key, value, ttl)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(key, error = %e, "Cache write failed, ignoring"),
        Err(_) => warn!(key, timeout_ms = limit.as_millis(), "Cache write timed out, ignoring"),
    }
}

/// Deletes an entry, logging and ignoring failures.
pub(crate) async fn evict(cache: &dyn CacheInterface, key: &str, limit: Duration) {
    match timeout(limit, cache.delete(key)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => warn!(key, error = %e, "Cache delete failed, ignoring"),
        Err(_) => warn!(key, timeout_ms = limit.as_millis(), "Cache delete timed out, ignoring"),
    }
}
