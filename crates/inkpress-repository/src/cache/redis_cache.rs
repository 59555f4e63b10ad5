//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, PoolConfig, Runtime, Timeouts};
use inkpress_config::RedisConfig;
use inkpress_core::{HealthCheck, HealthStatus, InkpressError, InkpressResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

const DEFAULT_PING_TIMEOUT: Duration = Duration::from_millis(500);

/// Redis-based cache service.
///
/// A disabled instance has no pool: reads miss and writes are no-ops.
#[derive(Clone)]
pub struct RedisCacheService {
    pool: Option<Arc<Pool>>,
    ping_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            ping_timeout: DEFAULT_PING_TIMEOUT,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled by configuration).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            ping_timeout: DEFAULT_PING_TIMEOUT,
        }
    }

    /// Builds a pool from configuration and checks it with a `PING`.
    ///
    /// Waiting for, opening and recycling a connection are each bounded by
    /// `redis.timeout_ms`. A failed first `PING` is logged and the pool is kept:
    /// connections are opened lazily, so the cache starts working once Redis
    /// comes up. Only an unusable URL is an error.
    pub async fn connect(config: &RedisConfig) -> InkpressResult<Self> {
        let timeout = config.timeout();
        let mut pool_config = PoolConfig::new(config.pool_size);
        pool_config.timeouts = Timeouts {
            wait: Some(timeout),
            create: Some(timeout),
            recycle: Some(timeout),
        };

        let mut cfg = Config::from_url(config.url.clone());
        cfg.pool = Some(pool_config);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| InkpressError::cache(format!("Failed to create Redis pool: {}", e)))?;

        let service = Self {
            pool: Some(Arc::new(pool)),
            ping_timeout: timeout,
        };
        match service.ping().await {
            Ok(()) => info!("Redis connection pool established"),
            Err(e) => warn!("Redis not reachable yet, serving cache misses until it is: {}", e),
        }
        Ok(service)
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> InkpressResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| InkpressError::cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(InkpressError::cache("Cache is disabled")),
        }
    }

    async fn ping(&self) -> InkpressResult<()> {
        let round_trip = async {
            let mut conn = self.get_conn().await?;
            let _: String = deadpool_redis::redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| InkpressError::cache(format!("Redis ping failed: {}", e)))?;
            Ok(())
        };
        tokio::time::timeout(self.ping_timeout, round_trip)
            .await
            .map_err(|_| InkpressError::cache("Redis ping timed out"))?
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.pool.is_some())
            .finish()
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> InkpressResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| InkpressError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> InkpressResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| InkpressError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> InkpressResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| InkpressError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        Ok(deleted > 0)
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "redis"
    }

    async fn check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Degraded("cache disabled".to_string());
        }
        match self.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_cache_misses_and_ignores_writes() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
        cache.set_raw("k", "v", DEFAULT_TTL).await.unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap(), None);
        assert!(!cache.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_disabled_cache_reports_degraded() {
        let status = RedisCacheService::disabled().check().await;
        assert!(matches!(status, HealthStatus::Degraded(_)));
    }

    #[tokio::test]
    async fn test_connect_keeps_pool_when_server_is_down() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            pool_size: 2,
            enabled: true,
            timeout_ms: 200,
        };

        let cache = tokio::time::timeout(Duration::from_secs(5), RedisCacheService::connect(&config))
            .await
            .expect("connect must be bounded by the configured timeout")
            .unwrap();
        assert!(cache.is_enabled());
        assert!(cache.get_raw("k").await.is_err());
        assert!(matches!(cache.check().await, HealthStatus::Degraded(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let config = RedisConfig {
            url: "not a url".to_string(),
            ..RedisConfig::default()
        };
        assert!(RedisCacheService::connect(&config).await.is_err());
    }
}
