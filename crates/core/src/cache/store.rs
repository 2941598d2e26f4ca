//! Expiring cache over the persistent key-value store.
//!
//! The wrapped market data API enforces hard per-minute and per-day
//! request quotas. This store turns that quota-constrained resource into
//! a practically unconstrained one from the caller's perspective, at the
//! cost of staleness bounded by a per-operation TTL.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::model::CacheEntry;
use super::traits::KvRepositoryTrait;
use crate::errors::Result;

/// Namespace for cache entries in the shared key-value store. Eviction in
/// bulk only ever touches this namespace, so other residents of the store
/// (watchlists, preferences) survive a cache clear.
const CACHE_PREFIX: &str = "cache:";

/// Generic expiring get/set/evict over the persistent store.
pub struct CacheStore {
    repository: Arc<dyn KvRepositoryTrait>,
}

impl CacheStore {
    pub fn new(repository: Arc<dyn KvRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn namespaced(key: &str) -> String {
        format!("{}{}", CACHE_PREFIX, key)
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Writes `value` under `key` with the given TTL.
    ///
    /// A cache write failure must never block the caller's primary
    /// operation, so failures (serialization or storage) are logged and
    /// swallowed.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let now = Self::now_ms();
        let entry = CacheEntry::new(value, now, ttl.as_millis() as i64);

        let encoded = match serde_json::to_string(&entry) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Failed to serialize cache entry for '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = self.repository.set(&Self::namespaced(key), &encoded).await {
            warn!("Failed to write cache entry for '{}': {}", key, e);
        }
    }

    /// Reads the value under `key` if present and not expired.
    ///
    /// Expired entries are evicted lazily on read. A missing, corrupt or
    /// unreadable entry is a miss, never an error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.repository.get(&Self::namespaced(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read cache entry for '{}': {}", key, e);
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding corrupt cache entry for '{}': {}", key, e);
                let _ = self.evict(key).await;
                return None;
            }
        };

        if entry.is_expired(Self::now_ms()) {
            debug!("Cache entry expired for '{}'", key);
            let _ = self.evict(key).await;
            return None;
        }

        Some(entry.data)
    }

    /// Removes one cache entry. Evicting an absent key is a no-op.
    pub async fn evict(&self, key: &str) -> Result<()> {
        self.repository.delete(&Self::namespaced(key)).await
    }

    /// Removes every cache entry, leaving un-namespaced keys untouched.
    pub async fn evict_all(&self) -> Result<usize> {
        self.repository.delete_with_prefix(CACHE_PREFIX).await
    }

    /// The cache-aside combinator every market data operation goes
    /// through: consult the cache (unless bypassed), run the fetcher on a
    /// miss, and cache only successful results. Fetcher errors propagate
    /// uncached.
    pub async fn cached<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        force_refresh: bool,
        fetch: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if !force_refresh {
            if let Some(hit) = self.get::<T>(key).await {
                debug!("Cache hit for '{}'", key);
                return Ok(hit);
            }
        }

        let value = fetch().await?;
        self.set(key, &value, ttl).await;
        Ok(value)
    }
}
