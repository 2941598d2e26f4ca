//! Symbol search models.

use serde::{Deserialize, Serialize};

/// A single match from a ticker/keyword search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolMatch {
    /// Symbol/ticker (e.g. "AAPL")
    pub symbol: String,

    /// Display name (e.g. "Apple Inc")
    pub name: String,

    /// Asset type (e.g. "Equity", "ETF")
    #[serde(default)]
    pub asset_type: String,

    /// Listing region (e.g. "United States")
    #[serde(default)]
    pub region: String,

    /// Local market open time (e.g. "09:30")
    #[serde(default)]
    pub market_open: String,

    /// Local market close time (e.g. "16:00")
    #[serde(default)]
    pub market_close: String,

    /// Market timezone (e.g. "UTC-04")
    #[serde(default)]
    pub timezone: String,

    /// Trading currency (e.g. "USD")
    #[serde(default)]
    pub currency: String,

    /// Relevance score from the API (higher = better match)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}

/// Result of the symbol search operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub matches: Vec<SymbolMatch>,
}
