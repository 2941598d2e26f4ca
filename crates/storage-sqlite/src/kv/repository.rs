use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::KvEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::kv_entries::dsl::*;
use marketlens_core::cache::KvRepositoryTrait;
use marketlens_core::errors::Result;

/// SQLite-backed persistent string-key / string-value store.
///
/// Reads go straight to the pool; every mutation is serialized through
/// the writer actor so single-key writes are atomic.
pub struct KvRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl KvRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        KvRepository { pool, writer }
    }
}

#[async_trait]
impl KvRepositoryTrait for KvRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let value = kv_entries
            .find(key)
            .select(entry_value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let entry = KvEntryDB {
            entry_key: key.to_string(),
            entry_value: value.to_string(),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(kv_entries)
                    .values(&entry)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let key_owned = key.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::delete(kv_entries.find(key_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let keys = kv_entries
            .filter(entry_key.like(format!("{}%", prefix)))
            .select(entry_key)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(keys)
    }

    async fn delete_with_prefix(&self, prefix: &str) -> Result<usize> {
        let pattern = format!("{}%", prefix);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(kv_entries.filter(entry_key.like(pattern)))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
