//! In-process cache backed by a map.

use super::CacheInterface;
use async_trait::async_trait;
use inkpress_core::InkpressResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Writes between sweeps of expired entries.
const SWEEP_EVERY: usize = 256;

/// Expiry instant, or `None` when the TTL runs past what `Instant` can hold.
type Expiry = Option<Instant>;

fn is_live(expires_at: &Expiry, now: Instant) -> bool {
    expires_at.map_or(true, |at| at > now)
}

/// A map-based cache with the same contract as [`super::RedisCacheService`].
///
/// Expired entries read as misses. They are swept out every few hundred writes.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, (String, Expiry)>>,
    writes: AtomicUsize,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a live entry exists for the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .get(key)
            .is_some_and(|(_, expires_at)| is_live(expires_at, Instant::now()))
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|(_, exp)| is_live(exp, now)).count()
    }

    /// Returns true if no live entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> InkpressResult<Option<String>> {
        let entries = self.entries.read();
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| is_live(expires_at, Instant::now()))
            .map(|(value, _)| value.clone()))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> InkpressResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        if self.writes.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            entries.retain(|_, (_, expires_at)| is_live(expires_at, now));
        }
        entries.insert(key.to_string(), (value.to_string(), now.checked_add(ttl)));
        Ok(())
    }

    async fn delete(&self, key: &str) -> InkpressResult<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
