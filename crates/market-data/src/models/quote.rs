//! Global quote model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest quote for a single symbol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalQuote {
    /// Ticker symbol
    pub ticker: String,

    /// Opening price of the latest trading day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    /// High of the latest trading day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    /// Low of the latest trading day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    /// Last traded price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// Trading volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    /// The latest trading day the quote refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_trading_day: Option<NaiveDate>,

    /// Previous session's closing price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Decimal>,

    /// Absolute change since previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Decimal>,

    /// Percentage change as reported (e.g. "-0.53%")
    #[serde(default)]
    pub change_percent: String,
}
