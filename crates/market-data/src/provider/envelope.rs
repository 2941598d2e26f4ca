//! Response-envelope classification.
//!
//! The wrapped API multiplexes four response shapes over HTTP 200: data
//! JSON, a notice envelope (`Note`/`Information`), an error envelope
//! (`Error Message`), and raw CSV text for the calendar operations. This
//! module classifies a body exactly once; endpoint decoders downstream
//! only ever see `Json` or `Csv` and never re-sniff envelope fields.

use serde_json::Value;

use crate::errors::MarketDataError;

/// A successfully classified response body.
#[derive(Debug)]
pub enum ApiBody {
    /// A JSON payload that is neither a notice nor an error envelope.
    Json(Value),
    /// A non-JSON payload; the calendar operations answer with raw CSV.
    Csv(String),
}

/// Classifies a raw response body.
///
/// Notice and error envelopes surface as [`MarketDataError::Notice`] and
/// [`MarketDataError::Remote`]; anything that does not parse as JSON is
/// assumed to be CSV.
pub fn classify(body: String) -> Result<ApiBody, MarketDataError> {
    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => return Ok(ApiBody::Csv(body)),
    };

    if let Some(message) = envelope_field(&value, "Note").or_else(|| envelope_field(&value, "Information")) {
        return Err(MarketDataError::Notice(message));
    }
    if let Some(message) = envelope_field(&value, "Error Message") {
        return Err(MarketDataError::Remote(message));
    }

    Ok(ApiBody::Json(value))
}

fn envelope_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}
