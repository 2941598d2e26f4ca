//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while talking to the market data API.
///
/// The first three variants come out of the response-envelope classifier:
/// the API likes to answer HTTP 200 with a JSON body that carries a notice
/// or an error message instead of data. Everything else is a transport or
/// decoding failure.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The API returned a rate-limit or informational notice envelope
    /// (a `Note` or `Information` field) instead of data.
    #[error("API notice: {0}")]
    Notice(String),

    /// The API returned an explicit error envelope (`Error Message` field),
    /// e.g. for an invalid API call.
    #[error("API error: {0}")]
    Remote(String),

    /// The response was well-formed but carried no data for the symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The API rate limited the request at the HTTP layer (429).
    #[error("Rate limited (HTTP 429)")]
    RateLimited,

    /// The request exceeded the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The API answered with a non-success HTTP status.
    #[error("HTTP {0}")]
    Status(u16),

    /// A network error occurred while communicating with the API.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl MarketDataError {
    /// Whether this is a transport-level failure (timeout, DNS, non-2xx,
    /// undecodable body) as opposed to an API-level envelope.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Status(_) | Self::Network(_) | Self::Decode(_)
        )
    }

    /// The notice text, if the API answered with a quota/advisory envelope.
    pub fn notice_text(&self) -> Option<&str> {
        match self {
            Self::Notice(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_is_not_transport() {
        let error = MarketDataError::Notice("thank you for using Alpha Vantage".to_string());
        assert!(!error.is_transport());
        assert_eq!(
            error.notice_text(),
            Some("thank you for using Alpha Vantage")
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(MarketDataError::Timeout.is_transport());
        assert!(MarketDataError::Status(503).is_transport());
        assert!(MarketDataError::Decode("bad json".to_string()).is_transport());
        assert!(!MarketDataError::Remote("Invalid API call".to_string()).is_transport());
        assert!(!MarketDataError::RateLimited.is_transport());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::Status(500);
        assert_eq!(format!("{}", error), "HTTP 500");
    }
}
