//! Market data service: cache-aside orchestration per operation.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{error, warn};

use marketlens_market_data::{
    align_overlay, CompanyOverview, EarningsEvent, GlobalQuote, IndicatorPoint, IpoEvent,
    MarketDataApi, MarketDataError, MarketStatusSnapshot, NewsFeed, SearchResults,
    TimeSeriesPoint, TopMovers,
};

use super::constants::{self, keys};
use super::market_traits::MarketDataServiceTrait;
use crate::cache::CacheStore;
use crate::errors::Result;

/// The presentation-facing market data service.
///
/// Every operation follows the same protocol: build the cache key,
/// consult the expiring store unless the caller forces a bypass, fetch on
/// miss with the operation's TTL, and absorb any [`MarketDataError`] into
/// the operation's sentinel.
pub struct MarketDataService {
    api: Arc<dyn MarketDataApi>,
    cache: Arc<CacheStore>,
}

impl MarketDataService {
    pub fn new(api: Arc<dyn MarketDataApi>, cache: Arc<CacheStore>) -> Self {
        Self { api, cache }
    }

    /// Diagnostic annotation for an unavailable top-movers result.
    fn movers_annotation(error: &MarketDataError) -> String {
        match error {
            MarketDataError::Notice(text) => text.clone(),
            MarketDataError::RateLimited => error.to_string(),
            e if e.is_transport() => "NETWORK_ERROR".to_string(),
            _ => "ERROR".to_string(),
        }
    }

    fn log_failure(operation: &str, error: &MarketDataError) {
        if error.notice_text().is_some() || matches!(error, MarketDataError::RateLimited) {
            warn!("{}: API notice: {}", operation, error);
        } else {
            error!("{}: {}", operation, error);
        }
    }
}

#[async_trait]
impl MarketDataServiceTrait for MarketDataService {
    async fn top_movers(&self, force_refresh: bool) -> TopMovers {
        let api = Arc::clone(&self.api);
        let fetched = self
            .cache
            .cached(keys::TOP_MOVERS, constants::TOP_MOVERS_TTL, force_refresh, || async move {
                api.top_movers().await
            })
            .await;

        match fetched {
            Ok(movers) => movers,
            Err(e) => {
                Self::log_failure("top_movers", &e);
                TopMovers::unavailable(Self::movers_annotation(&e))
            }
        }
    }

    async fn company_overview(&self, symbol: &str) -> Option<CompanyOverview> {
        let api = Arc::clone(&self.api);
        let symbol_owned = symbol.to_string();
        let fetched = self
            .cache
            .cached(
                &keys::company_overview(symbol),
                constants::COMPANY_OVERVIEW_TTL,
                false,
                || async move { api.company_overview(&symbol_owned).await },
            )
            .await;

        match fetched {
            Ok(overview) => Some(overview),
            Err(e) => {
                Self::log_failure("company_overview", &e);
                None
            }
        }
    }

    async fn search_symbols(&self, keywords: &str) -> SearchResults {
        let api = Arc::clone(&self.api);
        let keywords_owned = keywords.to_string();
        let fetched = self
            .cache
            .cached(
                &keys::search(keywords),
                constants::SEARCH_TTL,
                false,
                || async move { api.symbol_search(&keywords_owned).await },
            )
            .await;

        match fetched {
            Ok(results) => results,
            Err(e) => {
                Self::log_failure("search_symbols", &e);
                SearchResults::default()
            }
        }
    }

    async fn daily_series(&self, symbol: &str) -> Vec<TimeSeriesPoint> {
        let api = Arc::clone(&self.api);
        let symbol_owned = symbol.to_string();
        let fetched = self
            .cache
            .cached(
                &keys::daily_series(symbol),
                constants::TIME_SERIES_TTL,
                false,
                || async move { api.daily_series(&symbol_owned).await },
            )
            .await;

        match fetched {
            Ok(points) => points,
            Err(e) => {
                Self::log_failure("daily_series", &e);
                Vec::new()
            }
        }
    }

    async fn ipo_calendar(&self) -> Vec<IpoEvent> {
        let api = Arc::clone(&self.api);
        let fetched = self
            .cache
            .cached(keys::IPO_CALENDAR, constants::IPO_CALENDAR_TTL, false, || async move {
                api.ipo_calendar().await
            })
            .await;

        match fetched {
            Ok(events) => events,
            Err(e) => {
                Self::log_failure("ipo_calendar", &e);
                Vec::new()
            }
        }
    }

    async fn earnings_calendar(&self) -> Vec<EarningsEvent> {
        let api = Arc::clone(&self.api);
        let fetched = self
            .cache
            .cached(
                keys::EARNINGS_CALENDAR,
                constants::EARNINGS_CALENDAR_TTL,
                false,
                || async move { api.earnings_calendar().await },
            )
            .await;

        match fetched {
            Ok(events) => events,
            Err(e) => {
                Self::log_failure("earnings_calendar", &e);
                Vec::new()
            }
        }
    }

    async fn news(&self, ticker: Option<&str>) -> Option<NewsFeed> {
        let api = Arc::clone(&self.api);
        let ticker_owned = ticker.map(str::to_string);
        let fetched = self
            .cache
            .cached(&keys::news(ticker), constants::NEWS_TTL, false, || async move {
                api.news_sentiment(ticker_owned.as_deref()).await
            })
            .await;

        match fetched {
            Ok(feed) => Some(feed),
            Err(e) => {
                Self::log_failure("news", &e);
                None
            }
        }
    }

    async fn sma(&self, symbol: &str) -> Vec<IndicatorPoint> {
        let api = Arc::clone(&self.api);
        let symbol_owned = symbol.to_string();
        let fetched = self
            .cache
            .cached(&keys::sma(symbol), constants::INDICATOR_TTL, false, || async move {
                api.sma(&symbol_owned).await
            })
            .await;

        match fetched {
            Ok(points) => points,
            Err(e) => {
                Self::log_failure("sma", &e);
                Vec::new()
            }
        }
    }

    async fn global_quote(&self, symbol: &str) -> Option<GlobalQuote> {
        let api = Arc::clone(&self.api);
        let symbol_owned = symbol.to_string();
        let fetched = self
            .cache
            .cached(
                &keys::global_quote(symbol),
                constants::GLOBAL_QUOTE_TTL,
                false,
                || async move { api.global_quote(&symbol_owned).await },
            )
            .await;

        match fetched {
            Ok(quote) => Some(quote),
            Err(e) => {
                Self::log_failure("global_quote", &e);
                None
            }
        }
    }

    async fn sma_overlay(&self, symbol: &str) -> (Vec<TimeSeriesPoint>, Vec<IndicatorPoint>) {
        let (series, indicator) = tokio::join!(self.daily_series(symbol), self.sma(symbol));
        align_overlay(&series, &indicator)
    }

    async fn index_quotes(&self, symbols: &[&str]) -> Vec<GlobalQuote> {
        // The API has no bulk-quote operation, so this is an independent
        // batch of single-symbol requests. Failing symbols are dropped
        // rather than failing the whole batch.
        join_all(symbols.iter().map(|symbol| self.global_quote(symbol)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn market_status(&self) -> Option<MarketStatusSnapshot> {
        let api = Arc::clone(&self.api);
        let fetched = self
            .cache
            .cached(keys::MARKET_STATUS, constants::MARKET_STATUS_TTL, false, || async move {
                api.market_status().await
            })
            .await;

        match fetched {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                Self::log_failure("market_status", &e);
                None
            }
        }
    }

    async fn clear_cache(&self) -> Result<usize> {
        self.cache.evict_all().await
    }
}
