use async_trait::async_trait;

use crate::errors::Result;
use crate::watchlists::watchlists_model::Watchlist;

/// Trait for watchlist persistence.
///
/// The collection is persisted as a whole: there is no partial-update API
/// at the storage layer, every save writes all watchlists. This bounds
/// correctness (no partial writes are ever visible) at the cost of O(n)
/// writes per mutation, which is fine at tens of watchlists.
#[async_trait]
pub trait WatchlistRepositoryTrait: Send + Sync {
    /// Loads the full collection; an absent record is an empty collection.
    fn load_watchlists(&self) -> Result<Vec<Watchlist>>;

    /// Persists the full collection, replacing whatever was stored.
    async fn save_watchlists(&self, watchlists: &[Watchlist]) -> Result<()>;
}

/// Trait for watchlist service operations.
#[async_trait]
pub trait WatchlistServiceTrait: Send + Sync {
    /// All watchlists in creation order.
    fn get_watchlists(&self) -> Result<Vec<Watchlist>>;

    /// Creates an empty watchlist and returns its snapshot.
    async fn create_watchlist(&self, name: &str) -> Result<Watchlist>;

    /// Adds a ticker. Duplicate adds are silently ignored; an unresolved
    /// id fails with a not-found error and leaves storage unchanged.
    async fn add_ticker(&self, watchlist_id: &str, ticker: &str) -> Result<()>;

    /// Removes a ticker if present. An unresolved id fails with a
    /// not-found error.
    async fn remove_ticker(&self, watchlist_id: &str, ticker: &str) -> Result<()>;

    /// Deletes a watchlist. Deleting an absent id is a no-op.
    async fn delete_watchlist(&self, watchlist_id: &str) -> Result<()>;

    /// Whether at least one watchlist contains the ticker.
    fn contains_ticker(&self, ticker: &str) -> Result<bool>;

    /// All watchlists containing the ticker.
    fn find_by_ticker(&self, ticker: &str) -> Result<Vec<Watchlist>>;
}
