//! Market open/close status models.

use serde::{Deserialize, Serialize};

/// Trading status of a single market region.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRegionStatus {
    /// Market kind (e.g. "Equity", "Forex")
    #[serde(default)]
    pub market_type: String,

    /// Region name (e.g. "United States")
    #[serde(default)]
    pub region: String,

    /// Comma-separated primary exchanges for the region
    #[serde(default)]
    pub primary_exchanges: String,

    /// Local open time (e.g. "09:30")
    #[serde(default)]
    pub local_open: String,

    /// Local close time (e.g. "16:15")
    #[serde(default)]
    pub local_close: String,

    /// "open" or "closed"
    #[serde(default)]
    pub current_status: String,

    #[serde(default)]
    pub notes: String,
}

/// Result of the market status operation: one entry per tracked region.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatusSnapshot {
    pub markets: Vec<MarketRegionStatus>,
}

impl MarketStatusSnapshot {
    /// Whether the given region (case-insensitive) is currently open.
    pub fn is_open(&self, region: &str) -> bool {
        self.markets
            .iter()
            .any(|m| m.region.eq_ignore_ascii_case(region) && m.current_status == "open")
    }
}
