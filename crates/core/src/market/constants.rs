//! Cache TTLs and key builders for the market data operations.
//!
//! TTLs are the whole quota-survival strategy: the free API tier allows a
//! handful of requests per minute and a few dozen per day, so every
//! operation is served from cache for as long as its data can tolerate.

use std::time::Duration;

/// Rankings shift intraday, but not fast enough to spend quota on.
pub const TOP_MOVERS_TTL: Duration = Duration::from_secs(30 * 60);

/// Fundamentals change on filing cadence.
pub const COMPANY_OVERVIEW_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Search results for a keyword are effectively static within the hour.
pub const SEARCH_TTL: Duration = Duration::from_secs(60 * 60);

/// Daily bars gain at most one new bar per session.
pub const TIME_SERIES_TTL: Duration = Duration::from_secs(15 * 60);

pub const IPO_CALENDAR_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const EARNINGS_CALENDAR_TTL: Duration = Duration::from_secs(12 * 60 * 60);

pub const NEWS_TTL: Duration = Duration::from_secs(30 * 60);

/// Moving average shares the daily-series cadence.
pub const INDICATOR_TTL: Duration = Duration::from_secs(15 * 60);

pub const GLOBAL_QUOTE_TTL: Duration = Duration::from_secs(5 * 60);

pub const MARKET_STATUS_TTL: Duration = Duration::from_secs(10 * 60);

/// Index ETFs shown on the explore screen: S&P 500, Nasdaq 100, Dow Jones.
pub const INDEX_TICKERS: [&str; 3] = ["SPY", "QQQ", "DIA"];

/// Cache keys: operation name plus its discriminating parameter.
pub mod keys {
    pub const TOP_MOVERS: &str = "top_movers";
    pub const IPO_CALENDAR: &str = "ipo_calendar";
    pub const EARNINGS_CALENDAR: &str = "earnings_calendar";
    pub const MARKET_STATUS: &str = "market_status";

    pub fn company_overview(symbol: &str) -> String {
        format!("overview_{}", symbol)
    }

    pub fn search(keywords: &str) -> String {
        format!("search_{}", keywords)
    }

    pub fn daily_series(symbol: &str) -> String {
        format!("daily_series_{}", symbol)
    }

    pub fn news(ticker: Option<&str>) -> String {
        format!("news_{}", ticker.unwrap_or("global"))
    }

    pub fn sma(symbol: &str) -> String {
        format!("sma_{}", symbol)
    }

    pub fn global_quote(symbol: &str) -> String {
        format!("quote_{}", symbol)
    }
}
