//! Database model for key-value entries.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for one key-value pair.
#[derive(Queryable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::kv_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct KvEntryDB {
    pub entry_key: String,
    pub entry_value: String,
}
