//! Watchlist domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, ordered collection of ticker symbols.
///
/// Owned exclusively by the watchlist store; everything the presentation
/// layer sees is a snapshot returned from store operations. Ticker order
/// is insertion order and duplicates are forbidden (adds have set
/// semantics).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    pub id: String,
    pub name: String,
    pub stocks: Vec<String>,

    /// Creation time, persisted as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Watchlist {
    /// Creates an empty watchlist with a fresh creation-time-ordered id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: name.into(),
            stocks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.stocks.iter().any(|s| s == ticker)
    }
}
