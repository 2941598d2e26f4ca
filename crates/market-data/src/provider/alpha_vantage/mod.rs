//! Alpha Vantage client implementation.
//!
//! Every operation goes through the single query endpoint with a
//! `function` discriminator. Most operations answer JSON; the calendar
//! operations answer raw CSV. The free tier enforces hard per-minute and
//! per-day quotas, which the API signals with notice envelopes rather than
//! HTTP errors; see [`crate::provider::classify`].

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{
    sort_indicator_newest_first, sort_newest_first, CompanyOverview, EarningsEvent, GlobalQuote,
    IndicatorPoint, IpoEvent, MarketRegionStatus, MarketStatusSnapshot, Mover, NewsArticle,
    NewsFeed, SearchResults, SymbolMatch, TimeSeriesPoint, TopMovers,
};
use crate::provider::{classify, ApiBody, MarketDataApi};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Per-request timeout. Fixed, not configurable per call; expiry surfaces
/// as the transport-failure path.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// `function` discriminator values, one per remote capability.
const FN_TOP_MOVERS: &str = "TOP_GAINERS_LOSERS";
const FN_COMPANY_OVERVIEW: &str = "OVERVIEW";
const FN_SYMBOL_SEARCH: &str = "SYMBOL_SEARCH";
const FN_TIME_SERIES_DAILY: &str = "TIME_SERIES_DAILY";
const FN_IPO_CALENDAR: &str = "IPO_CALENDAR";
const FN_EARNINGS_CALENDAR: &str = "EARNINGS_CALENDAR";
const FN_NEWS_SENTIMENT: &str = "NEWS_SENTIMENT";
const FN_SMA: &str = "SMA";
const FN_GLOBAL_QUOTE: &str = "GLOBAL_QUOTE";
const FN_MARKET_STATUS: &str = "MARKET_STATUS";

/// Alpha Vantage market data client.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
}

// ============================================================================
// Raw response structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct MoversResponse {
    #[serde(rename = "last_updated", default)]
    last_updated: String,
    #[serde(rename = "top_gainers", default)]
    top_gainers: Vec<RawMover>,
    #[serde(rename = "top_losers", default)]
    top_losers: Vec<RawMover>,
    #[serde(rename = "most_actively_traded", default)]
    most_actively_traded: Vec<RawMover>,
}

#[derive(Debug, Deserialize)]
struct RawMover {
    #[serde(default)]
    ticker: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    change_amount: String,
    #[serde(default)]
    change_percentage: String,
    #[serde(default)]
    volume: String,
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    quote: Option<RawGlobalQuote>,
}

#[derive(Debug, Deserialize)]
struct RawGlobalQuote {
    #[serde(rename = "01. symbol", default)]
    symbol: String,
    #[serde(rename = "02. open", default)]
    open: String,
    #[serde(rename = "03. high", default)]
    high: String,
    #[serde(rename = "04. low", default)]
    low: String,
    #[serde(rename = "05. price", default)]
    price: String,
    #[serde(rename = "06. volume", default)]
    volume: String,
    #[serde(rename = "07. latest trading day", default)]
    latest_trading_day: String,
    #[serde(rename = "08. previous close", default)]
    previous_close: String,
    #[serde(rename = "09. change", default)]
    change: String,
    #[serde(rename = "10. change percent", default)]
    change_percent: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<RawSymbolMatch>,
}

#[derive(Debug, Deserialize)]
struct RawSymbolMatch {
    #[serde(rename = "1. symbol", default)]
    symbol: String,
    #[serde(rename = "2. name", default)]
    name: String,
    #[serde(rename = "3. type", default)]
    asset_type: String,
    #[serde(rename = "4. region", default)]
    region: String,
    #[serde(rename = "5. marketOpen", default)]
    market_open: String,
    #[serde(rename = "6. marketClose", default)]
    market_close: String,
    #[serde(rename = "7. timezone", default)]
    timezone: String,
    #[serde(rename = "8. currency", default)]
    currency: String,
    #[serde(rename = "9. matchScore", default)]
    match_score: String,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, RawDailyBar>>,
}

#[derive(Debug, Deserialize)]
struct RawDailyBar {
    #[serde(rename = "1. open", default)]
    open: String,
    #[serde(rename = "2. high", default)]
    high: String,
    #[serde(rename = "3. low", default)]
    low: String,
    #[serde(rename = "4. close", default)]
    close: String,
    #[serde(rename = "5. volume", default)]
    volume: String,
}

#[derive(Debug, Deserialize)]
struct SmaResponse {
    #[serde(rename = "Technical Analysis: SMA")]
    readings: Option<HashMap<String, RawSmaReading>>,
}

#[derive(Debug, Deserialize)]
struct RawSmaReading {
    #[serde(rename = "SMA", default)]
    sma: String,
}

/// OVERVIEW response. The API reports every field as a string and answers
/// `{}` for unknown symbols.
#[derive(Debug, Deserialize)]
struct RawCompanyOverview {
    #[serde(rename = "Symbol")]
    symbol: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Exchange")]
    exchange: Option<String>,
    #[serde(rename = "Currency")]
    currency: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Sector")]
    sector: Option<String>,
    #[serde(rename = "Industry")]
    industry: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    market_capitalization: Option<String>,
    #[serde(rename = "PERatio")]
    pe_ratio: Option<String>,
    #[serde(rename = "DividendYield")]
    dividend_yield: Option<String>,
    #[serde(rename = "52WeekHigh")]
    week_52_high: Option<String>,
    #[serde(rename = "52WeekLow")]
    week_52_low: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    feed: Vec<RawNewsArticle>,
}

#[derive(Debug, Deserialize)]
struct RawNewsArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    time_published: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    banner_image: Option<String>,
    #[serde(default)]
    source: String,
    #[serde(default)]
    overall_sentiment_label: String,
    #[serde(default)]
    overall_sentiment_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketStatusResponse {
    #[serde(default)]
    markets: Vec<RawMarketStatus>,
}

#[derive(Debug, Deserialize)]
struct RawMarketStatus {
    #[serde(default)]
    market_type: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    primary_exchanges: String,
    #[serde(default)]
    local_open: String,
    #[serde(default)]
    local_close: String,
    #[serde(default)]
    current_status: String,
    #[serde(default)]
    notes: String,
}

// ============================================================================
// AlphaVantageClient implementation
// ============================================================================

impl AlphaVantageClient {
    /// Creates a new client with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Issues a request and classifies the response body.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<ApiBody, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        let url = reqwest::Url::parse_with_params(BASE_URL, &all_params)
            .map_err(|e| MarketDataError::Decode(format!("Failed to build URL: {}", e)))?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited);
        }
        if !status.is_success() {
            return Err(MarketDataError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(MarketDataError::Network)?;
        classify(body)
    }

    fn expect_json(body: ApiBody) -> Result<Value, MarketDataError> {
        match body {
            ApiBody::Json(value) => Ok(value),
            ApiBody::Csv(_) => Err(MarketDataError::Decode(
                "expected a JSON response, got CSV".to_string(),
            )),
        }
    }

    fn expect_csv(body: ApiBody) -> Result<String, MarketDataError> {
        match body {
            ApiBody::Csv(text) => Ok(text),
            ApiBody::Json(_) => Err(MarketDataError::Decode(
                "expected a CSV response, got JSON".to_string(),
            )),
        }
    }

    /// Parses a date string in YYYY-MM-DD format.
    fn parse_date(date_str: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
    }

    /// Parses a decimal value from a string.
    fn parse_decimal(s: &str) -> Option<Decimal> {
        Decimal::from_str(s.trim()).ok()
    }

    /// Parses a string field as f64, handling the API's "None" and "-"
    /// placeholder values.
    fn parse_f64(s: &Option<String>) -> Option<f64> {
        s.as_ref()
            .filter(|v| !v.is_empty() && *v != "None" && *v != "-")
            .and_then(|v| v.parse::<f64>().ok())
    }

    fn normalize_mover(raw: RawMover) -> Mover {
        Mover {
            ticker: raw.ticker,
            price: Self::parse_decimal(&raw.price),
            change_amount: Self::parse_decimal(&raw.change_amount),
            change_percentage: raw.change_percentage,
            volume: Self::parse_decimal(&raw.volume),
        }
    }

    fn decode_top_movers(value: Value) -> Result<TopMovers, MarketDataError> {
        let response: MoversResponse =
            serde_json::from_value(value).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        Ok(TopMovers {
            gainers: response
                .top_gainers
                .into_iter()
                .map(Self::normalize_mover)
                .collect(),
            losers: response
                .top_losers
                .into_iter()
                .map(Self::normalize_mover)
                .collect(),
            most_active: response
                .most_actively_traded
                .into_iter()
                .map(Self::normalize_mover)
                .collect(),
            last_updated: response.last_updated,
            notice: None,
        })
    }

    fn decode_company_overview(value: Value) -> Result<CompanyOverview, MarketDataError> {
        let raw: RawCompanyOverview =
            serde_json::from_value(value).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        // The API answers an empty object for symbols it does not know.
        let symbol = match raw.symbol {
            Some(ref s) if !s.is_empty() => s.clone(),
            _ => return Err(MarketDataError::SymbolNotFound("no overview data".to_string())),
        };

        Ok(CompanyOverview {
            symbol,
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            exchange: raw.exchange.unwrap_or_default(),
            currency: raw.currency.unwrap_or_default(),
            country: raw.country.unwrap_or_default(),
            sector: raw.sector.unwrap_or_default(),
            industry: raw.industry.unwrap_or_default(),
            market_cap: Self::parse_f64(&raw.market_capitalization),
            pe_ratio: Self::parse_f64(&raw.pe_ratio),
            dividend_yield: Self::parse_f64(&raw.dividend_yield),
            week_52_high: Self::parse_f64(&raw.week_52_high),
            week_52_low: Self::parse_f64(&raw.week_52_low),
        })
    }

    fn decode_search_results(value: Value) -> Result<SearchResults, MarketDataError> {
        let response: SearchResponse =
            serde_json::from_value(value).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        let matches = response
            .best_matches
            .into_iter()
            .map(|raw| SymbolMatch {
                symbol: raw.symbol,
                name: raw.name,
                asset_type: raw.asset_type,
                region: raw.region,
                market_open: raw.market_open,
                market_close: raw.market_close,
                timezone: raw.timezone,
                currency: raw.currency,
                match_score: raw.match_score.trim().parse::<f64>().ok(),
            })
            .collect();

        Ok(SearchResults { matches })
    }

    fn decode_daily_series(
        value: Value,
        symbol: &str,
    ) -> Result<Vec<TimeSeriesPoint>, MarketDataError> {
        let response: TimeSeriesResponse =
            serde_json::from_value(value).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        let time_series = response.time_series.ok_or_else(|| {
            MarketDataError::SymbolNotFound(format!("no daily series for symbol: {}", symbol))
        })?;

        let mut points: Vec<TimeSeriesPoint> = time_series
            .into_iter()
            .filter_map(|(date_str, bar)| {
                let date = Self::parse_date(&date_str)?;
                Some(TimeSeriesPoint {
                    date,
                    open: Self::parse_decimal(&bar.open),
                    high: Self::parse_decimal(&bar.high),
                    low: Self::parse_decimal(&bar.low),
                    close: Self::parse_decimal(&bar.close),
                    volume: Self::parse_decimal(&bar.volume),
                })
            })
            .collect();

        sort_newest_first(&mut points);
        Ok(points)
    }

    fn decode_sma(value: Value, symbol: &str) -> Result<Vec<IndicatorPoint>, MarketDataError> {
        let response: SmaResponse =
            serde_json::from_value(value).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        let readings = response.readings.ok_or_else(|| {
            MarketDataError::SymbolNotFound(format!("no SMA data for symbol: {}", symbol))
        })?;

        let mut points: Vec<IndicatorPoint> = readings
            .into_iter()
            .filter_map(|(date_str, reading)| {
                let date = Self::parse_date(&date_str)?;
                Some(IndicatorPoint {
                    date,
                    value: Self::parse_decimal(&reading.sma),
                })
            })
            .collect();

        sort_indicator_newest_first(&mut points);
        Ok(points)
    }

    fn decode_global_quote(value: Value, symbol: &str) -> Result<GlobalQuote, MarketDataError> {
        let response: GlobalQuoteResponse =
            serde_json::from_value(value).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        // An empty "Global Quote" object means the symbol is unknown.
        let raw = match response.quote {
            Some(raw) if !raw.symbol.is_empty() => raw,
            _ => {
                return Err(MarketDataError::SymbolNotFound(format!(
                    "no quote data for symbol: {}",
                    symbol
                )))
            }
        };

        Ok(GlobalQuote {
            ticker: raw.symbol,
            open: Self::parse_decimal(&raw.open),
            high: Self::parse_decimal(&raw.high),
            low: Self::parse_decimal(&raw.low),
            price: Self::parse_decimal(&raw.price),
            volume: Self::parse_decimal(&raw.volume),
            latest_trading_day: Self::parse_date(&raw.latest_trading_day),
            previous_close: Self::parse_decimal(&raw.previous_close),
            change: Self::parse_decimal(&raw.change),
            change_percent: raw.change_percent,
        })
    }

    fn decode_news(value: Value) -> Result<NewsFeed, MarketDataError> {
        let response: NewsResponse =
            serde_json::from_value(value).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        let articles = response
            .feed
            .into_iter()
            .map(|raw| NewsArticle {
                title: raw.title,
                url: raw.url,
                time_published: raw.time_published,
                authors: raw.authors,
                summary: raw.summary,
                banner_image: raw.banner_image,
                source: raw.source,
                overall_sentiment_label: raw.overall_sentiment_label,
                overall_sentiment_score: raw.overall_sentiment_score,
            })
            .collect();

        Ok(NewsFeed { articles })
    }

    fn decode_market_status(value: Value) -> Result<MarketStatusSnapshot, MarketDataError> {
        let response: MarketStatusResponse =
            serde_json::from_value(value).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        let markets = response
            .markets
            .into_iter()
            .map(|raw| MarketRegionStatus {
                market_type: raw.market_type,
                region: raw.region,
                primary_exchanges: raw.primary_exchanges,
                local_open: raw.local_open,
                local_close: raw.local_close,
                current_status: raw.current_status,
                notes: raw.notes,
            })
            .collect();

        Ok(MarketStatusSnapshot { markets })
    }

    /// Parses an IPO calendar CSV payload.
    ///
    /// Columns: symbol, name, ipoDate, priceRangeLow, priceRangeHigh,
    /// currency, exchange. The header row is skipped; rows with fewer than
    /// two fields are discarded as blank/trailing lines.
    fn parse_ipo_csv(text: &str) -> Vec<IpoEvent> {
        Self::csv_records(text)
            .into_iter()
            .map(|fields| IpoEvent {
                symbol: fields.first().cloned().unwrap_or_default(),
                name: fields.get(1).cloned().unwrap_or_default(),
                ipo_date: fields.get(2).and_then(|s| Self::parse_date(s)),
                price_range_low: fields.get(3).and_then(|s| Self::parse_decimal(s)),
                price_range_high: fields.get(4).and_then(|s| Self::parse_decimal(s)),
                currency: fields.get(5).cloned().unwrap_or_default(),
                exchange: fields.get(6).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Parses an earnings calendar CSV payload.
    ///
    /// Columns: symbol, name, reportDate, fiscalDateEnding, estimate,
    /// currency.
    fn parse_earnings_csv(text: &str) -> Vec<EarningsEvent> {
        Self::csv_records(text)
            .into_iter()
            .map(|fields| EarningsEvent {
                symbol: fields.first().cloned().unwrap_or_default(),
                name: fields.get(1).cloned().unwrap_or_default(),
                report_date: fields.get(2).and_then(|s| Self::parse_date(s)),
                fiscal_date_ending: fields.get(3).and_then(|s| Self::parse_date(s)),
                estimate: fields.get(4).and_then(|s| Self::parse_decimal(s)),
                currency: fields.get(5).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Reads CSV data rows, skipping the header and any row with fewer
    /// than two fields.
    fn csv_records(text: &str) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        reader
            .records()
            .filter_map(|record| record.ok())
            .filter(|record| record.len() >= 2)
            .map(|record| record.iter().map(str::to_string).collect())
            .collect()
    }
}

// ============================================================================
// MarketDataApi trait implementation
// ============================================================================

#[async_trait]
impl MarketDataApi for AlphaVantageClient {
    async fn top_movers(&self) -> Result<TopMovers, MarketDataError> {
        let body = self.fetch(&[("function", FN_TOP_MOVERS)]).await?;
        let movers = Self::decode_top_movers(Self::expect_json(body)?)?;

        debug!(
            "Alpha Vantage: fetched {} gainers / {} losers / {} most active",
            movers.gainers.len(),
            movers.losers.len(),
            movers.most_active.len()
        );
        Ok(movers)
    }

    async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview, MarketDataError> {
        let params = [("function", FN_COMPANY_OVERVIEW), ("symbol", symbol)];
        let body = self.fetch(&params).await?;
        Self::decode_company_overview(Self::expect_json(body)?)
    }

    async fn symbol_search(&self, keywords: &str) -> Result<SearchResults, MarketDataError> {
        let params = [("function", FN_SYMBOL_SEARCH), ("keywords", keywords)];
        let body = self.fetch(&params).await?;
        Self::decode_search_results(Self::expect_json(body)?)
    }

    async fn daily_series(&self, symbol: &str) -> Result<Vec<TimeSeriesPoint>, MarketDataError> {
        let params = [
            ("function", FN_TIME_SERIES_DAILY),
            ("symbol", symbol),
            // 'full' is premium-only on this endpoint
            ("outputsize", "compact"),
        ];
        let body = self.fetch(&params).await?;
        let points = Self::decode_daily_series(Self::expect_json(body)?, symbol)?;

        debug!(
            "Alpha Vantage: fetched {} daily bars for {}",
            points.len(),
            symbol
        );
        Ok(points)
    }

    async fn ipo_calendar(&self) -> Result<Vec<IpoEvent>, MarketDataError> {
        let body = self.fetch(&[("function", FN_IPO_CALENDAR)]).await?;
        Ok(Self::parse_ipo_csv(&Self::expect_csv(body)?))
    }

    async fn earnings_calendar(&self) -> Result<Vec<EarningsEvent>, MarketDataError> {
        let params = [("function", FN_EARNINGS_CALENDAR), ("horizon", "3month")];
        let body = self.fetch(&params).await?;
        Ok(Self::parse_earnings_csv(&Self::expect_csv(body)?))
    }

    async fn news_sentiment(&self, ticker: Option<&str>) -> Result<NewsFeed, MarketDataError> {
        let mut params = vec![("function", FN_NEWS_SENTIMENT), ("limit", "50")];
        if let Some(ticker) = ticker {
            params.push(("tickers", ticker));
        }
        let body = self.fetch(&params).await?;
        Self::decode_news(Self::expect_json(body)?)
    }

    async fn sma(&self, symbol: &str) -> Result<Vec<IndicatorPoint>, MarketDataError> {
        let params = [
            ("function", FN_SMA),
            ("symbol", symbol),
            ("interval", "daily"),
            ("time_period", "20"),
            ("series_type", "close"),
        ];
        let body = self.fetch(&params).await?;
        Self::decode_sma(Self::expect_json(body)?, symbol)
    }

    async fn global_quote(&self, symbol: &str) -> Result<GlobalQuote, MarketDataError> {
        let params = [("function", FN_GLOBAL_QUOTE), ("symbol", symbol)];
        let body = self.fetch(&params).await?;
        Self::decode_global_quote(Self::expect_json(body)?, symbol)
    }

    async fn market_status(&self) -> Result<MarketStatusSnapshot, MarketDataError> {
        let body = self.fetch(&[("function", FN_MARKET_STATUS)]).await?;
        Self::decode_market_status(Self::expect_json(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_date() {
        let date = AlphaVantageClient::parse_date("2024-01-15");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(AlphaVantageClient::parse_date("invalid").is_none());
        assert!(AlphaVantageClient::parse_date("01-15-2024").is_none());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(
            AlphaVantageClient::parse_decimal("150.25"),
            Some(dec!(150.25))
        );
        assert!(AlphaVantageClient::parse_decimal("invalid").is_none());
    }

    #[test]
    fn test_parse_f64_placeholders() {
        assert_eq!(
            AlphaVantageClient::parse_f64(&Some("123.45".to_string())),
            Some(123.45)
        );
        assert_eq!(AlphaVantageClient::parse_f64(&Some("None".to_string())), None);
        assert_eq!(AlphaVantageClient::parse_f64(&Some("-".to_string())), None);
        assert_eq!(AlphaVantageClient::parse_f64(&Some("".to_string())), None);
        assert_eq!(AlphaVantageClient::parse_f64(&None), None);
    }

    #[test]
    fn test_decode_top_movers() {
        let json = serde_json::json!({
            "metadata": "Top gainers, losers, and most actively traded US tickers",
            "last_updated": "2024-01-15 16:15:59 US/Eastern",
            "top_gainers": [
                {"ticker": "AAA", "price": "2.5", "change_amount": "0.5", "change_percentage": "25.0%", "volume": "100000"}
            ],
            "top_losers": [
                {"ticker": "BBB", "price": "1.0", "change_amount": "-0.5", "change_percentage": "-33.3%", "volume": "50000"}
            ],
            "most_actively_traded": []
        });

        let movers = AlphaVantageClient::decode_top_movers(json).unwrap();
        assert_eq!(movers.gainers.len(), 1);
        assert_eq!(movers.gainers[0].ticker, "AAA");
        assert_eq!(movers.gainers[0].price, Some(dec!(2.5)));
        assert_eq!(movers.gainers[0].change_percentage, "25.0%");
        assert_eq!(movers.losers[0].change_amount, Some(dec!(-0.5)));
        assert!(movers.most_active.is_empty());
        assert_eq!(movers.last_updated, "2024-01-15 16:15:59 US/Eastern");
        assert!(movers.notice.is_none());
    }

    #[test]
    fn test_decode_company_overview() {
        let json = serde_json::json!({
            "Symbol": "IBM",
            "Name": "International Business Machines",
            "Description": "Integrated solutions.",
            "Exchange": "NYSE",
            "Currency": "USD",
            "Country": "USA",
            "Sector": "TECHNOLOGY",
            "Industry": "COMPUTER & OFFICE EQUIPMENT",
            "MarketCapitalization": "191234567890",
            "PERatio": "22.5",
            "DividendYield": "0.0455",
            "52WeekHigh": "199.18",
            "52WeekLow": "128.06"
        });

        let overview = AlphaVantageClient::decode_company_overview(json).unwrap();
        assert_eq!(overview.symbol, "IBM");
        assert_eq!(overview.sector, "TECHNOLOGY");
        assert_eq!(overview.market_cap, Some(191234567890.0));
        assert_eq!(overview.pe_ratio, Some(22.5));
        assert_eq!(overview.week_52_low, Some(128.06));
    }

    #[test]
    fn test_decode_company_overview_empty_object() {
        let result = AlphaVantageClient::decode_company_overview(serde_json::json!({}));
        assert!(matches!(result, Err(MarketDataError::SymbolNotFound(_))));
    }

    #[test]
    fn test_decode_search_results() {
        let json = serde_json::json!({
            "bestMatches": [{
                "1. symbol": "AAPL",
                "2. name": "Apple Inc",
                "3. type": "Equity",
                "4. region": "United States",
                "5. marketOpen": "09:30",
                "6. marketClose": "16:00",
                "7. timezone": "UTC-04",
                "8. currency": "USD",
                "9. matchScore": "0.8889"
            }]
        });

        let results = AlphaVantageClient::decode_search_results(json).unwrap();
        assert_eq!(results.matches.len(), 1);
        assert_eq!(results.matches[0].symbol, "AAPL");
        assert_eq!(results.matches[0].asset_type, "Equity");
        assert_eq!(results.matches[0].match_score, Some(0.8889));
    }

    #[test]
    fn test_decode_daily_series_sorted_newest_first() {
        let json = serde_json::json!({
            "Time Series (Daily)": {
                "2024-01-10": {"1. open": "100", "2. high": "101", "3. low": "99", "4. close": "100.5", "5. volume": "1000"},
                "2024-01-12": {"1. open": "102", "2. high": "103", "3. low": "101", "4. close": "102.5", "5. volume": "1200"},
                "2024-01-11": {"1. open": "101", "2. high": "102", "3. low": "100", "4. close": "101.5", "5. volume": "1100"}
            }
        });

        let points = AlphaVantageClient::decode_daily_series(json, "TEST").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        assert_eq!(points[2].date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(points[0].close, Some(dec!(102.5)));
    }

    #[test]
    fn test_decode_daily_series_missing_map() {
        let result =
            AlphaVantageClient::decode_daily_series(serde_json::json!({"Meta Data": {}}), "NOPE");
        assert!(matches!(result, Err(MarketDataError::SymbolNotFound(_))));
    }

    #[test]
    fn test_decode_sma_sorted_newest_first() {
        let json = serde_json::json!({
            "Technical Analysis: SMA": {
                "2024-01-10": {"SMA": "100.10"},
                "2024-01-12": {"SMA": "100.30"},
                "2024-01-11": {"SMA": "100.20"}
            }
        });

        let points = AlphaVantageClient::decode_sma(json, "TEST").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        assert_eq!(points[0].value, Some(dec!(100.30)));
    }

    #[test]
    fn test_decode_global_quote() {
        let json = serde_json::json!({
            "Global Quote": {
                "01. symbol": "SPY",
                "02. open": "470.10",
                "03. high": "472.00",
                "04. low": "469.50",
                "05. price": "471.23",
                "06. volume": "65432100",
                "07. latest trading day": "2024-01-12",
                "08. previous close": "469.00",
                "09. change": "2.23",
                "10. change percent": "0.4755%"
            }
        });

        let quote = AlphaVantageClient::decode_global_quote(json, "SPY").unwrap();
        assert_eq!(quote.ticker, "SPY");
        assert_eq!(quote.price, Some(dec!(471.23)));
        assert_eq!(quote.change, Some(dec!(2.23)));
        assert_eq!(quote.change_percent, "0.4755%");
        assert_eq!(
            quote.latest_trading_day,
            NaiveDate::from_ymd_opt(2024, 1, 12)
        );
    }

    #[test]
    fn test_decode_global_quote_empty() {
        let json = serde_json::json!({"Global Quote": {}});
        let result = AlphaVantageClient::decode_global_quote(json, "NOPE");
        assert!(matches!(result, Err(MarketDataError::SymbolNotFound(_))));
    }

    #[test]
    fn test_decode_news_defaults() {
        let json = serde_json::json!({
            "items": "1",
            "feed": [{"title": "Markets rally", "url": "https://example.com/a"}]
        });

        let feed = AlphaVantageClient::decode_news(json).unwrap();
        assert_eq!(feed.articles.len(), 1);
        assert_eq!(feed.articles[0].title, "Markets rally");
        assert!(feed.articles[0].authors.is_empty());
        assert!(feed.articles[0].overall_sentiment_score.is_none());
    }

    #[test]
    fn test_decode_market_status() {
        let json = serde_json::json!({
            "endpoint": "Global Market Open & Close Status",
            "markets": [{
                "market_type": "Equity",
                "region": "United States",
                "primary_exchanges": "NASDAQ, NYSE",
                "local_open": "09:30",
                "local_close": "16:15",
                "current_status": "open",
                "notes": ""
            }]
        });

        let snapshot = AlphaVantageClient::decode_market_status(json).unwrap();
        assert_eq!(snapshot.markets.len(), 1);
        assert!(snapshot.is_open("united states"));
        assert!(!snapshot.is_open("japan"));
    }

    #[test]
    fn test_parse_ipo_csv() {
        let csv = "symbol,name,ipoDate,priceRangeLow,priceRangeHigh,currency,exchange\n\
                   AAA,Alpha Co,2024-01-01,10.00,12.00,USD,NYSE\n\
                   BBB,Beta Inc,2024-01-02,5.00,6.50,USD,NASDAQ\n";

        let events = AlphaVantageClient::parse_ipo_csv(csv);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].symbol, "AAA");
        assert_eq!(events[0].name, "Alpha Co");
        assert_eq!(events[0].ipo_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(events[0].price_range_low, Some(dec!(10.00)));
        assert_eq!(events[1].exchange, "NASDAQ");
    }

    #[test]
    fn test_parse_csv_trailing_blank_line() {
        let csv = "sym,name,date\nAAA,Alpha Co,2024-01-01\nBBB,Beta Inc,2024-01-02\n\n";
        let records = AlphaVantageClient::csv_records(csv);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_csv_discards_short_rows() {
        let csv = "sym,name\nAAA,Alpha Co\nstray\nBBB,Beta Inc\n";
        let records = AlphaVantageClient::csv_records(csv);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0][0], "AAA");
        assert_eq!(records[1][0], "BBB");
    }

    #[test]
    fn test_parse_earnings_csv() {
        let csv = "symbol,name,reportDate,fiscalDateEnding,estimate,currency\n\
                   IBM,International Business Machines,2024-01-24,2023-12-31,3.78,USD\n";

        let events = AlphaVantageClient::parse_earnings_csv(csv);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].symbol, "IBM");
        assert_eq!(events[0].report_date, NaiveDate::from_ymd_opt(2024, 1, 24));
        assert_eq!(events[0].estimate, Some(dec!(3.78)));
        assert_eq!(events[0].currency, "USD");
    }
}
