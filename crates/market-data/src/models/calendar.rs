//! IPO and earnings calendar models.
//!
//! Both calendars come back from the API as raw CSV rather than JSON.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One upcoming IPO from the IPO calendar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpoEvent {
    pub symbol: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipo_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range_low: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range_high: Option<Decimal>,

    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub exchange: String,
}

/// One upcoming earnings report from the earnings calendar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsEvent {
    pub symbol: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_date_ending: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Decimal>,

    #[serde(default)]
    pub currency: String,
}
