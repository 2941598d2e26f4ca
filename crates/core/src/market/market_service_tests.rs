//! Tests for the market data service contract.
//!
//! These exercise the cache-aside protocol and the absorption of remote
//! failures into sentinels, against a stubbed API and an in-memory store.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use marketlens_market_data::{
        CompanyOverview, EarningsEvent, GlobalQuote, IndicatorPoint, IpoEvent, MarketDataApi,
        MarketDataError, MarketStatusSnapshot, Mover, NewsFeed, SearchResults, TimeSeriesPoint,
        TopMovers,
    };

    use crate::cache::{CacheStore, KvRepositoryTrait};
    use crate::errors::Result;
    use crate::market::{MarketDataService, MarketDataServiceTrait};

    // =========================================================================
    // In-memory KV store
    // =========================================================================

    #[derive(Default)]
    struct MemoryKv {
        entries: Mutex<BTreeMap<String, String>>,
    }

    #[async_trait]
    impl KvRepositoryTrait for MemoryKv {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect())
        }

        async fn delete_with_prefix(&self, prefix: &str) -> Result<usize> {
            let mut entries = self.entries.lock().unwrap();
            let doomed: Vec<String> = entries
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect();
            for key in &doomed {
                entries.remove(key);
            }
            Ok(doomed.len())
        }
    }

    // =========================================================================
    // Stub remote API
    // =========================================================================

    /// How the stub answers data requests.
    #[derive(Clone, Copy)]
    enum Mode {
        Live,
        QuotaNotice,
        RemoteError,
        Transport,
    }

    struct StubApi {
        mode: Mode,
        /// Symbols whose quote requests fail regardless of mode.
        failing_quotes: Vec<String>,
        calls: AtomicUsize,
    }

    impl StubApi {
        fn new(mode: Mode) -> Self {
            Self {
                mode,
                failing_quotes: Vec::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn fail<T>(&self) -> std::result::Result<T, MarketDataError> {
            match self.mode {
                Mode::QuotaNotice => Err(MarketDataError::Notice("quota exceeded".to_string())),
                Mode::RemoteError => Err(MarketDataError::Remote("Invalid API call".to_string())),
                Mode::Transport => Err(MarketDataError::Timeout),
                Mode::Live => unreachable!("fail() only called for failure modes"),
            }
        }

        fn day(n: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
        }
    }

    #[async_trait]
    impl MarketDataApi for StubApi {
        async fn top_movers(&self) -> std::result::Result<TopMovers, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                Mode::Live => Ok(TopMovers {
                    gainers: vec![Mover {
                        ticker: "AAA".to_string(),
                        price: Some(dec!(2.5)),
                        change_amount: Some(dec!(0.5)),
                        change_percentage: "25.0%".to_string(),
                        volume: Some(dec!(100000)),
                    }],
                    losers: Vec::new(),
                    most_active: Vec::new(),
                    last_updated: "2024-01-15 16:15:59 US/Eastern".to_string(),
                    notice: None,
                }),
                _ => self.fail(),
            }
        }

        async fn company_overview(
            &self,
            symbol: &str,
        ) -> std::result::Result<CompanyOverview, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                Mode::Live => Ok(CompanyOverview {
                    symbol: symbol.to_string(),
                    name: "Test Co".to_string(),
                    ..CompanyOverview::default()
                }),
                _ => self.fail(),
            }
        }

        async fn symbol_search(
            &self,
            _keywords: &str,
        ) -> std::result::Result<SearchResults, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                Mode::Live => Ok(SearchResults::default()),
                _ => self.fail(),
            }
        }

        async fn daily_series(
            &self,
            _symbol: &str,
        ) -> std::result::Result<Vec<TimeSeriesPoint>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                // D3..D1, newest-first.
                Mode::Live => Ok((1..=3)
                    .rev()
                    .map(|n| TimeSeriesPoint {
                        date: Self::day(n),
                        open: Some(dec!(100)),
                        high: Some(dec!(101)),
                        low: Some(dec!(99)),
                        close: Some(dec!(100.5)),
                        volume: Some(dec!(1000)),
                    })
                    .collect()),
                _ => self.fail(),
            }
        }

        async fn ipo_calendar(&self) -> std::result::Result<Vec<IpoEvent>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                Mode::Live => Ok(Vec::new()),
                _ => self.fail(),
            }
        }

        async fn earnings_calendar(
            &self,
        ) -> std::result::Result<Vec<EarningsEvent>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                Mode::Live => Ok(Vec::new()),
                _ => self.fail(),
            }
        }

        async fn news_sentiment(
            &self,
            _ticker: Option<&str>,
        ) -> std::result::Result<NewsFeed, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                Mode::Live => Ok(NewsFeed::default()),
                _ => self.fail(),
            }
        }

        async fn sma(
            &self,
            _symbol: &str,
        ) -> std::result::Result<Vec<IndicatorPoint>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                // D4..D2, newest-first: overlaps the daily series on D2/D3.
                Mode::Live => Ok((2..=4)
                    .rev()
                    .map(|n| IndicatorPoint {
                        date: Self::day(n),
                        value: Some(dec!(100.2)),
                    })
                    .collect()),
                _ => self.fail(),
            }
        }

        async fn global_quote(
            &self,
            symbol: &str,
        ) -> std::result::Result<GlobalQuote, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_quotes.iter().any(|s| s == symbol) {
                return Err(MarketDataError::Remote("Invalid API call".to_string()));
            }
            match self.mode {
                Mode::Live => Ok(GlobalQuote {
                    ticker: symbol.to_string(),
                    open: None,
                    high: None,
                    low: None,
                    price: Some(dec!(471.23)),
                    volume: None,
                    latest_trading_day: Some(Self::day(12)),
                    previous_close: None,
                    change: Some(dec!(2.23)),
                    change_percent: "0.4755%".to_string(),
                }),
                _ => self.fail(),
            }
        }

        async fn market_status(
            &self,
        ) -> std::result::Result<MarketStatusSnapshot, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                Mode::Live => Ok(MarketStatusSnapshot::default()),
                _ => self.fail(),
            }
        }
    }

    fn service(mode: Mode) -> (Arc<StubApi>, MarketDataService) {
        let api = Arc::new(StubApi::new(mode));
        let cache = Arc::new(CacheStore::new(Arc::new(MemoryKv::default())));
        let service = MarketDataService::new(api.clone(), cache);
        (api, service)
    }

    // =========================================================================
    // Failure absorption
    // =========================================================================

    #[tokio::test]
    async fn test_quota_notice_becomes_annotated_empty_movers() {
        let (_, service) = service(Mode::QuotaNotice);
        let movers = service.top_movers(false).await;

        assert!(movers.gainers.is_empty());
        assert!(movers.losers.is_empty());
        assert_eq!(movers.notice.as_deref(), Some("quota exceeded"));
    }

    #[tokio::test]
    async fn test_remote_error_annotation() {
        let (_, service) = service(Mode::RemoteError);
        let movers = service.top_movers(false).await;
        assert_eq!(movers.notice.as_deref(), Some("ERROR"));
    }

    #[tokio::test]
    async fn test_transport_failure_annotation() {
        let (_, service) = service(Mode::Transport);
        let movers = service.top_movers(false).await;
        assert_eq!(movers.notice.as_deref(), Some("NETWORK_ERROR"));
    }

    #[tokio::test]
    async fn test_failures_become_sentinels_across_operations() {
        let (_, service) = service(Mode::Transport);

        assert!(service.company_overview("AAPL").await.is_none());
        assert!(service.search_symbols("apple").await.matches.is_empty());
        assert!(service.daily_series("AAPL").await.is_empty());
        assert!(service.ipo_calendar().await.is_empty());
        assert!(service.earnings_calendar().await.is_empty());
        assert!(service.news(None).await.is_none());
        assert!(service.sma("AAPL").await.is_empty());
        assert!(service.global_quote("AAPL").await.is_none());
        assert!(service.market_status().await.is_none());
    }

    // =========================================================================
    // Cache-aside protocol
    // =========================================================================

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let (api, service) = service(Mode::Live);

        let first = service.top_movers(false).await;
        let second = service.top_movers(false).await;

        assert_eq!(first, second);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_cache() {
        let (api, service) = service(Mode::Live);

        service.top_movers(false).await;
        service.top_movers(true).await;

        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let (api, service) = service(Mode::QuotaNotice);

        service.top_movers(false).await;
        service.top_movers(false).await;

        // No poisoned cache entry: both reads went to the API.
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_cache_keys_discriminate_by_symbol() {
        let (api, service) = service(Mode::Live);

        service.global_quote("SPY").await;
        service.global_quote("QQQ").await;
        service.global_quote("SPY").await;

        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let (api, service) = service(Mode::Live);

        service.market_status().await;
        let removed = service.clear_cache().await.unwrap();
        assert_eq!(removed, 1);
        service.market_status().await;

        assert_eq!(api.calls(), 2);
    }

    // =========================================================================
    // Batches and overlays
    // =========================================================================

    #[tokio::test]
    async fn test_index_quote_batch_drops_failing_symbol() {
        let mut api = StubApi::new(Mode::Live);
        api.failing_quotes.push("QQQ".to_string());
        let api = Arc::new(api);
        let cache = Arc::new(CacheStore::new(Arc::new(MemoryKv::default())));
        let service = MarketDataService::new(api, cache);

        let quotes = service.index_quotes(&["SPY", "QQQ", "DIA"]).await;

        let tickers: Vec<&str> = quotes.iter().map(|q| q.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["SPY", "DIA"]);
    }

    #[tokio::test]
    async fn test_sma_overlay_aligns_on_common_dates() {
        let (_, service) = service(Mode::Live);

        let (series, indicator) = service.sma_overlay("AAPL").await;

        // Daily covers D1..D3, SMA covers D2..D4; the overlay is D3, D2.
        assert_eq!(series.len(), 2);
        assert_eq!(indicator.len(), 2);
        assert_eq!(series[0].date, StubApi::day(3));
        assert_eq!(series[1].date, StubApi::day(2));
        for (bar, reading) in series.iter().zip(indicator.iter()) {
            assert_eq!(bar.date, reading.date);
        }
    }
}
