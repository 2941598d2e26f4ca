//! Cache entry envelope.

use serde::{Deserialize, Serialize};

/// A cached value together with its expiration bookkeeping.
///
/// Invariant: `expires_at = timestamp + ttl`. An entry read after
/// `now > expires_at` is treated as absent and evicted by the reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    pub data: T,

    /// When the entry was written, epoch milliseconds.
    pub timestamp: i64,

    /// When the entry stops being served, epoch milliseconds.
    pub expires_at: i64,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            data,
            timestamp: now_ms,
            expires_at: now_ms + ttl_ms,
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at
    }
}
