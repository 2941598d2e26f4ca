//! Market data API trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{
    CompanyOverview, EarningsEvent, GlobalQuote, IndicatorPoint, IpoEvent, MarketStatusSnapshot,
    NewsFeed, SearchResults, TimeSeriesPoint, TopMovers,
};

/// One typed request function per remote capability.
///
/// Implementations are honest about failure: envelope notices, remote
/// errors and transport problems all come back as [`MarketDataError`].
/// The caching service layered on top is what converts those into the
/// soft-empty results the presentation layer consumes.
///
/// Time-series-like results (daily series, moving average) are returned
/// sorted newest-first; callers cache them in that order.
#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// Top gainers, losers and most actively traded tickers.
    async fn top_movers(&self) -> Result<TopMovers, MarketDataError>;

    /// Company fundamentals for a symbol.
    async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview, MarketDataError>;

    /// Symbol/keyword search.
    async fn symbol_search(&self, keywords: &str) -> Result<SearchResults, MarketDataError>;

    /// Daily OHLCV series for a symbol, newest-first.
    async fn daily_series(&self, symbol: &str) -> Result<Vec<TimeSeriesPoint>, MarketDataError>;

    /// Upcoming IPOs (CSV-backed).
    async fn ipo_calendar(&self) -> Result<Vec<IpoEvent>, MarketDataError>;

    /// Upcoming earnings reports (CSV-backed).
    async fn earnings_calendar(&self) -> Result<Vec<EarningsEvent>, MarketDataError>;

    /// News and sentiment, optionally filtered to one ticker.
    async fn news_sentiment(&self, ticker: Option<&str>) -> Result<NewsFeed, MarketDataError>;

    /// Simple moving average readings for a symbol, newest-first.
    async fn sma(&self, symbol: &str) -> Result<Vec<IndicatorPoint>, MarketDataError>;

    /// Latest quote for a symbol.
    async fn global_quote(&self, symbol: &str) -> Result<GlobalQuote, MarketDataError>;

    /// Open/closed status of the major market regions.
    async fn market_status(&self) -> Result<MarketStatusSnapshot, MarketDataError>;
}
