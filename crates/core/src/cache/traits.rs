//! Persistent key-value storage boundary.

use async_trait::async_trait;

use crate::errors::Result;

/// Trait for the persistent string-key / string-value store.
///
/// Both the expiring cache (under its `cache:` namespace) and the
/// watchlist repository (under its own un-namespaced key) sit on this
/// substrate. The store offers atomic single-key operations plus prefix
/// enumeration and bulk delete; all structure lives in the values as JSON
/// text, the store itself is never queried structurally.
#[async_trait]
pub trait KvRepositoryTrait: Send + Sync {
    /// Returns the value for `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Returns all keys starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Removes every key starting with `prefix`, returning how many were
    /// removed. Keys outside the prefix are untouched.
    async fn delete_with_prefix(&self, prefix: &str) -> Result<usize>;
}
