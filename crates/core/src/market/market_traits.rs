//! Market data service trait.

use async_trait::async_trait;

use marketlens_market_data::{
    CompanyOverview, EarningsEvent, GlobalQuote, IndicatorPoint, IpoEvent, MarketStatusSnapshot,
    NewsFeed, SearchResults, TimeSeriesPoint, TopMovers,
};

use crate::errors::Result;

/// The presentation-facing market data surface.
///
/// Every method absorbs remote-side failures (quota notices, error
/// envelopes, transport problems) into the operation's empty/neutral
/// sentinel - callers never handle network errors, only "is this empty".
/// The only failures that do surface are local storage problems on
/// explicit cache management.
#[async_trait]
pub trait MarketDataServiceTrait: Send + Sync {
    /// Top gainers/losers/most active. On failure the result is empty and
    /// `notice` carries the API notice text, "ERROR" or "NETWORK_ERROR".
    async fn top_movers(&self, force_refresh: bool) -> TopMovers;

    /// Company fundamentals; `None` when unavailable.
    async fn company_overview(&self, symbol: &str) -> Option<CompanyOverview>;

    /// Symbol search; empty matches when unavailable.
    async fn search_symbols(&self, keywords: &str) -> SearchResults;

    /// Daily OHLCV series, newest-first; empty when unavailable.
    async fn daily_series(&self, symbol: &str) -> Vec<TimeSeriesPoint>;

    /// Upcoming IPOs; empty when unavailable.
    async fn ipo_calendar(&self) -> Vec<IpoEvent>;

    /// Upcoming earnings reports; empty when unavailable.
    async fn earnings_calendar(&self) -> Vec<EarningsEvent>;

    /// News and sentiment, optionally scoped to one ticker; `None` when
    /// unavailable.
    async fn news(&self, ticker: Option<&str>) -> Option<NewsFeed>;

    /// Simple moving average, newest-first; empty when unavailable.
    async fn sma(&self, symbol: &str) -> Vec<IndicatorPoint>;

    /// Latest quote; `None` when unavailable.
    async fn global_quote(&self, symbol: &str) -> Option<GlobalQuote>;

    /// Daily series and SMA overlay restricted to their common dates so
    /// they align point-for-point, both newest-first.
    async fn sma_overlay(&self, symbol: &str) -> (Vec<TimeSeriesPoint>, Vec<IndicatorPoint>);

    /// Independent single-symbol quote batch; failed symbols are dropped,
    /// the rest keep their input order.
    async fn index_quotes(&self, symbols: &[&str]) -> Vec<GlobalQuote>;

    /// Market open/close status; `None` when unavailable.
    async fn market_status(&self) -> Option<MarketStatusSnapshot>;

    /// Drops every cached market data entry, returning how many were
    /// removed. Watchlists and other non-cache data are untouched.
    async fn clear_cache(&self) -> Result<usize>;
}
