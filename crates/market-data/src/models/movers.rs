//! Top gainers/losers/most-active models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single entry from the top-movers rankings.
///
/// The API reports every numeric field as a string; fields that fail to
/// parse are kept as `None` rather than dropping the whole row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    /// Ticker symbol (e.g. "NVDA")
    pub ticker: String,

    /// Last traded price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// Absolute change since previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_amount: Option<Decimal>,

    /// Percentage change as reported (e.g. "3.21%")
    #[serde(default)]
    pub change_percentage: String,

    /// Trading volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
}

/// Result of the top gainers/losers operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopMovers {
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
    pub most_active: Vec<Mover>,

    /// When the rankings were computed, as reported by the API.
    #[serde(default)]
    pub last_updated: String,

    /// Diagnostic annotation when the rankings are unavailable: the API
    /// notice text, "ERROR", or "NETWORK_ERROR". `None` on live data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl TopMovers {
    /// An empty result annotated with the reason the data is unavailable.
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }
}
