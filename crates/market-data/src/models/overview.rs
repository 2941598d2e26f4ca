//! Company fundamentals model.

use serde::{Deserialize, Serialize};

/// Company fundamentals from the OVERVIEW operation.
///
/// The API returns every field as a string and uses "None", "-" or an
/// empty string for missing values; numeric fields are normalized to
/// `Option<f64>` with those placeholders mapped to `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyOverview {
    pub symbol: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub exchange: String,

    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub sector: String,

    #[serde(default)]
    pub industry: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_52_high: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_52_low: Option<f64>,
}
