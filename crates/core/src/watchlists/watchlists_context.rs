//! Reactive watchlist context for the presentation layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::watchlists_model::Watchlist;
use super::watchlists_traits::WatchlistServiceTrait;
use crate::errors::Result;

/// Injected context object holding a snapshot of the watchlist
/// collection.
///
/// The lifecycle is explicit: `init` loads the snapshot from the store,
/// every mutating method delegates to the service and then reloads the
/// full snapshot. Reads (`watchlists`, `is_in_watchlist`) serve the
/// snapshot without touching storage, so screens can query membership on
/// every row render.
pub struct WatchlistContext {
    service: Arc<dyn WatchlistServiceTrait>,
    snapshot: RwLock<Vec<Watchlist>>,
}

impl WatchlistContext {
    pub fn new(service: Arc<dyn WatchlistServiceTrait>) -> Self {
        Self {
            service,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Loads the snapshot from the store.
    pub async fn init(&self) -> Result<()> {
        self.reload().await
    }

    async fn reload(&self) -> Result<()> {
        let watchlists = self.service.get_watchlists()?;
        *self.snapshot.write().await = watchlists;
        Ok(())
    }

    /// Current snapshot, creation order.
    pub async fn watchlists(&self) -> Vec<Watchlist> {
        self.snapshot.read().await.clone()
    }

    /// Whether any watchlist in the snapshot contains the ticker.
    pub async fn is_in_watchlist(&self, ticker: &str) -> bool {
        self.snapshot
            .read()
            .await
            .iter()
            .any(|w| w.contains(ticker))
    }

    pub async fn create_watchlist(&self, name: &str) -> Result<Watchlist> {
        let watchlist = self.service.create_watchlist(name).await?;
        self.reload().await?;
        Ok(watchlist)
    }

    pub async fn add_ticker(&self, watchlist_id: &str, ticker: &str) -> Result<()> {
        self.service.add_ticker(watchlist_id, ticker).await?;
        self.reload().await
    }

    pub async fn remove_ticker(&self, watchlist_id: &str, ticker: &str) -> Result<()> {
        self.service.remove_ticker(watchlist_id, ticker).await?;
        self.reload().await
    }

    pub async fn delete_watchlist(&self, watchlist_id: &str) -> Result<()> {
        self.service.delete_watchlist(watchlist_id).await?;
        self.reload().await
    }
}
