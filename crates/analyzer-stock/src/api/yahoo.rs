//! Yahoo Finance API client

use super::{
    HistoryPeriod, MarketInfo, PriceHistoryFetcher, PricePoint, SymbolCandidate, SymbolSearch,
};
use crate::error::{Result, ResearchError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{debug, instrument, warn};
use yahoo_finance_api as yahoo;

const PROVIDER: &str = "Yahoo Finance";
const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";
const BROWSER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";
const SEARCH_QUOTES_COUNT: u32 = 5;

/// Yahoo Finance API client
///
/// Daily history goes through the `yahoo_finance_api` connector; metadata
/// and symbol search hit the public JSON endpoints directly.
#[derive(Clone)]
pub struct YahooFinanceClient {
    http: Client,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    exchange_name: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
    regular_market_volume: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    symbol: Option<String>,
    longname: Option<String>,
    shortname: Option<String>,
    exchange: Option<String>,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_AGENT));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { http, timeout })
    }

    /// Get daily quotes between two instants
    pub async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>> {
        let provider =
            yahoo::YahooConnector::new().map_err(|e| ResearchError::provider(PROVIDER, e))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| ResearchError::provider(PROVIDER, format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| ResearchError::provider(PROVIDER, format!("Invalid end timestamp: {e}")))?;

        let response = self
            .bounded(provider.get_quote_history(symbol, start_odt, end_odt))
            .await?
            .map_err(|e| ResearchError::provider(PROVIDER, e))?;

        let quotes = response
            .quotes()
            .map_err(|e| ResearchError::provider(PROVIDER, e))?;

        Ok(quotes
            .iter()
            .filter(|q| q.close.is_finite())
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0).map(|ts| PricePoint {
                    date: ts.date_naive(),
                    open: q.open,
                    close: q.close,
                })
            })
            .collect())
    }

    /// Get daily quotes for a trailing period ending now
    pub async fn get_historical_range(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<Vec<PricePoint>> {
        let end = Utc::now();
        let start = end - chrono::Duration::days(period.days());
        self.get_historical_quotes(symbol, start, end).await
    }

    /// Instrument metadata from the chart endpoint
    #[instrument(skip(self))]
    pub async fn get_market_info(&self, symbol: &str) -> Result<MarketInfo> {
        let url = format!("{CHART_URL}/{}", urlencoding::encode(symbol));

        let response = self
            .http
            .get(&url)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| ResearchError::provider(PROVIDER, format!("chart request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ResearchError::provider(
                PROVIDER,
                format!("chart HTTP {status} for {symbol}"),
            ));
        }

        let envelope: ChartEnvelope = response.json().await.map_err(|e| {
            ResearchError::provider(PROVIDER, format!("Failed to parse chart response: {e}"))
        })?;

        parse_chart_meta(symbol, envelope)
    }

    /// Free-text symbol search
    #[instrument(skip(self))]
    pub async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolCandidate>> {
        let quotes_count = SEARCH_QUOTES_COUNT.to_string();
        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("q", query),
                ("quotesCount", quotes_count.as_str()),
                ("newsCount", "0"),
                ("enableFuzzyQuery", "false"),
            ])
            .send()
            .await
            .map_err(|e| ResearchError::provider(PROVIDER, format!("search request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ResearchError::provider(
                PROVIDER,
                format!("search HTTP {}", response.status()),
            ));
        }

        let data: SearchResponse = response.json().await.map_err(|e| {
            ResearchError::provider(PROVIDER, format!("Failed to parse search response: {e}"))
        })?;

        let candidates = into_candidates(data);
        debug!("Yahoo search for '{}' returned {} candidate(s)", query, candidates.len());
        Ok(candidates)
    }

    /// The connector has no per-call timeout of its own
    async fn bounded<F: Future>(&self, fut: F) -> Result<F::Output> {
        tokio::time::timeout(self.timeout, fut).await.map_err(|_| {
            ResearchError::provider(PROVIDER, format!("request timed out after {:?}", self.timeout))
        })
    }
}

fn parse_chart_meta(symbol: &str, envelope: ChartEnvelope) -> Result<MarketInfo> {
    if let Some(error) = envelope.chart.error {
        let code = error.code.unwrap_or_else(|| "unknown".to_string());
        let desc = error.description.unwrap_or_else(|| "No description".to_string());
        warn!("Yahoo API returned error for {}: {} - {}", symbol, code, desc);
        return Err(ResearchError::provider(PROVIDER, format!("{code}: {desc}")));
    }

    let meta = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .map(|r| r.meta)
        .ok_or_else(|| ResearchError::provider(PROVIDER, format!("no chart result for {symbol}")))?;

    Ok(MarketInfo {
        currency: meta.currency,
        exchange: meta.exchange_name,
        long_name: meta.long_name.or(meta.short_name),
        fifty_two_week_high: meta.fifty_two_week_high,
        fifty_two_week_low: meta.fifty_two_week_low,
        volume: meta.regular_market_volume,
    })
}

fn into_candidates(data: SearchResponse) -> Vec<SymbolCandidate> {
    data.quotes
        .into_iter()
        .filter_map(|q| {
            let symbol = q.symbol.filter(|s| !s.trim().is_empty())?;
            Some(SymbolCandidate {
                symbol,
                long_name: q.longname,
                short_name: q.shortname,
                exchange: q.exchange,
            })
        })
        .collect()
}

#[async_trait]
impl PriceHistoryFetcher for YahooFinanceClient {
    async fn fetch(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<PricePoint>> {
        self.get_historical_range(symbol, period).await
    }

    async fn market_info(&self, symbol: &str) -> Result<MarketInfo> {
        self.get_market_info(symbol).await
    }
}

#[async_trait]
impl SymbolSearch for YahooFinanceClient {
    async fn search(&self, query: &str) -> Result<Vec<SymbolCandidate>> {
        self.search_symbols(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_meta() {
        let envelope: ChartEnvelope = serde_json::from_value(serde_json::json!({
            "chart": {
                "result": [{
                    "meta": {
                        "currency": "INR",
                        "exchangeName": "NSI",
                        "longName": "Tata Consultancy Services Limited",
                        "fiftyTwoWeekHigh": 4592.25,
                        "fiftyTwoWeekLow": 3056.05,
                        "regularMarketVolume": 1843211
                    }
                }],
                "error": null
            }
        }))
        .unwrap();

        let info = parse_chart_meta("TCS.NS", envelope).unwrap();
        assert_eq!(info.currency.as_deref(), Some("INR"));
        assert_eq!(info.exchange.as_deref(), Some("NSI"));
        assert_eq!(info.volume, Some(1_843_211));
        assert_eq!(info.fifty_two_week_low, Some(3056.05));
    }

    #[test]
    fn test_parse_chart_error() {
        let envelope: ChartEnvelope = serde_json::from_value(serde_json::json!({
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }))
        .unwrap();

        let err = parse_chart_meta("NOPE", envelope).unwrap_err();
        assert!(err.to_string().contains("delisted"));
    }

    #[test]
    fn test_search_candidates_skip_blank_symbols() {
        let data: SearchResponse = serde_json::from_value(serde_json::json!({
            "quotes": [
                {"symbol": "", "shortname": "ghost"},
                {"symbol": "7203.T", "longname": "Toyota Motor Corporation", "exchange": "JPX"},
                {"shortname": "no symbol at all"}
            ]
        }))
        .unwrap();

        let candidates = into_candidates(data);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].symbol, "7203.T");
        assert_eq!(candidates[0].display_name(), Some("Toyota Motor Corporation"));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_historical_range() {
        let client = YahooFinanceClient::new(Duration::from_secs(10)).unwrap();
        let points = client
            .get_historical_range("AAPL", HistoryPeriod::OneMonth)
            .await
            .unwrap();
        assert!(points.len() >= 2);
        assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_search_symbols() {
        let client = YahooFinanceClient::new(Duration::from_secs(10)).unwrap();
        let candidates = client.search_symbols("Toyota").await.unwrap();
        assert!(!candidates.is_empty());
    }
}
