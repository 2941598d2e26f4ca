//! Marketlens Market Data Crate
//!
//! Thin typed client for the Alpha Vantage market data API.
//!
//! # Overview
//!
//! The API is a single HTTP endpoint with a `function` discriminator
//! parameter. It is quota-limited (hard per-minute and per-day request
//! caps on the free tier) and answers HTTP 200 for most failure modes,
//! carrying a notice or error envelope in the JSON body instead. Calendar
//! operations answer raw CSV text.
//!
//! Responses are classified exactly once into a tagged envelope
//! ([`provider::classify`]); typed decoding happens afterwards, so
//! endpoint code never re-sniffs envelope fields. The client is honest
//! about failures: converting them into the soft-empty results the
//! presentation layer sees is the caching service's job, one layer up.
//!
//! # Core Types
//!
//! - [`AlphaVantageClient`] - the HTTP client, one method per operation
//! - [`MarketDataApi`] - trait seam for stubbing the client in tests
//! - [`MarketDataError`] - failure taxonomy (envelope vs. transport)
//! - [`models`] - normalized, nullable-safe records per operation

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{
    align_overlay, CompanyOverview, EarningsEvent, GlobalQuote, IndicatorPoint, IpoEvent,
    MarketRegionStatus, MarketStatusSnapshot, Mover, NewsArticle, NewsFeed, SearchResults,
    SymbolMatch, TimeSeriesPoint, TopMovers,
};
pub use provider::{alpha_vantage::AlphaVantageClient, ApiBody, MarketDataApi};
