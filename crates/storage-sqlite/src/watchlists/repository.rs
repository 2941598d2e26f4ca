use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::kv::KvEntryDB;
use crate::schema::kv_entries::dsl::*;
use marketlens_core::errors::Result;
use marketlens_core::watchlists::{Watchlist, WatchlistRepositoryTrait};

/// The un-namespaced key the whole collection lives under. It shares the
/// `kv_entries` table with the cache but is never touched by cache
/// eviction.
const WATCHLISTS_KEY: &str = "watchlists";

/// Persists the watchlist collection as a single JSON document.
///
/// Every save rewrites the whole collection; there is no partial-update
/// path, so readers never observe a half-written state.
pub struct WatchlistRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WatchlistRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        WatchlistRepository { pool, writer }
    }
}

#[async_trait]
impl WatchlistRepositoryTrait for WatchlistRepository {
    fn load_watchlists(&self) -> Result<Vec<Watchlist>> {
        let mut conn = get_connection(&self.pool)?;
        let stored = kv_entries
            .find(WATCHLISTS_KEY)
            .select(entry_value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        match stored {
            // Unlike a corrupt cache entry, a malformed watchlist payload
            // is user data and propagates instead of reading as empty.
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_watchlists(&self, watchlists: &[Watchlist]) -> Result<()> {
        let entry = KvEntryDB {
            entry_key: WATCHLISTS_KEY.to_string(),
            entry_value: serde_json::to_string(watchlists)?,
        };
        let count = watchlists.len();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(kv_entries)
                    .values(&entry)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await?;

        debug!("Persisted {} watchlists", count);
        Ok(())
    }
}
