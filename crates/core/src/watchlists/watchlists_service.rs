//! Watchlist service: read-modify-write over the persisted collection.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::watchlists_model::Watchlist;
use super::watchlists_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

/// CRUD over the single persisted watchlist collection.
///
/// Every mutation loads the full collection, edits it in memory, and
/// persists it back. Two concurrent mutations that interleave before
/// either persists read the same stale collection and the later write
/// wins, an accepted limitation for a single-user, single-device store.
pub struct WatchlistService {
    repository: Arc<dyn WatchlistRepositoryTrait>,
}

impl WatchlistService {
    pub fn new(repository: Arc<dyn WatchlistRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn not_found(watchlist_id: &str) -> Error {
        Error::Database(DatabaseError::NotFound(format!(
            "Watchlist not found: {}",
            watchlist_id
        )))
    }
}

#[async_trait]
impl WatchlistServiceTrait for WatchlistService {
    fn get_watchlists(&self) -> Result<Vec<Watchlist>> {
        self.repository.load_watchlists()
    }

    async fn create_watchlist(&self, name: &str) -> Result<Watchlist> {
        let mut watchlists = self.repository.load_watchlists()?;
        let watchlist = Watchlist::new(name);
        watchlists.push(watchlist.clone());
        self.repository.save_watchlists(&watchlists).await?;

        debug!("Created watchlist '{}' ({})", watchlist.name, watchlist.id);
        Ok(watchlist)
    }

    async fn add_ticker(&self, watchlist_id: &str, ticker: &str) -> Result<()> {
        let mut watchlists = self.repository.load_watchlists()?;
        let watchlist = watchlists
            .iter_mut()
            .find(|w| w.id == watchlist_id)
            .ok_or_else(|| Self::not_found(watchlist_id))?;

        // Set semantics: a duplicate add is silently ignored, not an error.
        if watchlist.contains(ticker) {
            return Ok(());
        }

        watchlist.stocks.push(ticker.to_string());
        self.repository.save_watchlists(&watchlists).await
    }

    async fn remove_ticker(&self, watchlist_id: &str, ticker: &str) -> Result<()> {
        let mut watchlists = self.repository.load_watchlists()?;
        let watchlist = watchlists
            .iter_mut()
            .find(|w| w.id == watchlist_id)
            .ok_or_else(|| Self::not_found(watchlist_id))?;

        watchlist.stocks.retain(|s| s != ticker);
        self.repository.save_watchlists(&watchlists).await
    }

    async fn delete_watchlist(&self, watchlist_id: &str) -> Result<()> {
        let mut watchlists = self.repository.load_watchlists()?;
        // Deleting an id that is already gone is a no-op, not an error.
        watchlists.retain(|w| w.id != watchlist_id);
        self.repository.save_watchlists(&watchlists).await
    }

    fn contains_ticker(&self, ticker: &str) -> Result<bool> {
        let watchlists = self.repository.load_watchlists()?;
        Ok(watchlists.iter().any(|w| w.contains(ticker)))
    }

    fn find_by_ticker(&self, ticker: &str) -> Result<Vec<Watchlist>> {
        let watchlists = self.repository.load_watchlists()?;
        Ok(watchlists
            .into_iter()
            .filter(|w| w.contains(ticker))
            .collect())
    }
}
