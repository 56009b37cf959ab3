// In crates/api-client/src/lib.rs

use app_config::YahooSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Candle, NewsItem, Symbol};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::time::Duration;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

/// Supplies an ordered OHLCV series for a symbol.
///
/// Implementations must fail soft on an unknown symbol: an empty series, not an error.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetches bars covering `lookback` (e.g. "5d") at `interval` (e.g. "5m"),
    /// ordered by timestamp ascending.
    async fn fetch_candles(
        &self,
        symbol: &Symbol,
        lookback: &str,
        interval: &str,
    ) -> Result<Vec<Candle>>;
}

/// Supplies recent news items for a symbol, most relevant first. May be empty.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn fetch_headlines(&self, symbol: &Symbol) -> Result<Vec<NewsItem>>;
}

impl YahooClient {
    /// Constructs a new client from `YahooSettings`.
    pub fn new(settings: &YahooSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(YahooClient {
            http_client,
            chart_base_url: settings.chart_base_url.trim_end_matches('/').to_string(),
            search_base_url: settings.search_base_url.trim_end_matches('/').to_string(),
            news_count: settings.news_count,
        })
    }
}

#[async_trait]
impl CandleSource for YahooClient {
    /// Corresponds to `GET /v8/finance/chart/{symbol}?range=..&interval=..`.
    async fn fetch_candles(
        &self,
        symbol: &Symbol,
        lookback: &str,
        interval: &str,
    ) -> Result<Vec<Candle>> {
        let url = format!(
            "{}/v8/finance/chart/{}",
            self.chart_base_url,
            urlencoding::encode(symbol.as_str())
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("range", lookback), ("interval", interval)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(symbol = %symbol, "Chart endpoint does not know this symbol.");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        parse_chart(&body)
    }
}

#[async_trait]
impl HeadlineSource for YahooClient {
    /// Corresponds to `GET /v1/finance/search?q={symbol}&quotesCount=0&newsCount=..`.
    async fn fetch_headlines(&self, symbol: &Symbol) -> Result<Vec<NewsItem>> {
        let url = format!("{}/v1/finance/search", self.search_base_url);
        let news_count = self.news_count.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("q", symbol.as_str()),
                ("quotesCount", "0"),
                ("newsCount", news_count.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        parse_news(&body)
    }
}

/// Converts a chart response body into candles.
///
/// Bars with any missing OHLC field are dropped; a missing volume counts as zero.
/// A "Not Found" error object yields an empty series.
pub fn parse_chart(body: &str) -> Result<Vec<Candle>> {
    let response: RawChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        if error.code.eq_ignore_ascii_case("Not Found") {
            return Ok(Vec::new());
        }
        return Err(Error::ApiError {
            code: error.code,
            msg: error.description,
        });
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| Error::DataUnavailable("chart response has no quote block".into()))?;

    let candles = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let timestamp = DateTime::<Utc>::from_timestamp(ts, 0)?;
            let field = |column: &[Option<f64>]| {
                column.get(i).copied().flatten().and_then(Decimal::from_f64)
            };
            Some(Candle {
                timestamp,
                open: field(&quote.open[..])?,
                high: field(&quote.high[..])?,
                low: field(&quote.low[..])?,
                close: field(&quote.close[..])?,
                volume: field(&quote.volume[..]).unwrap_or_default(),
            })
        })
        .collect();

    Ok(candles)
}

/// Converts a search response body into news items, preserving source order.
pub fn parse_news(body: &str) -> Result<Vec<NewsItem>> {
    let response: RawSearchResponse = serde_json::from_str(body)?;

    let items = response
        .news
        .into_iter()
        .map(|raw| NewsItem {
            title: raw.title,
            publisher: raw.publisher,
            link: raw.link,
        })
        .collect();

    Ok(items)
}

/// Builds an error for a non-success HTTP status, preferring Yahoo's own error object.
fn status_error(status: StatusCode, body: &str) -> Error {
    if let Ok(response) = serde_json::from_str::<RawChartResponse>(body) {
        if let Some(error) = response.chart.error {
            return Error::ApiError {
                code: error.code,
                msg: error.description,
            };
        }
    }
    Error::ApiError {
        code: status.as_u16().to_string(),
        msg: status.canonical_reason().unwrap_or("Unknown error").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "^NSEI"},
                "timestamp": [1700000000, 1700000300, 1700000600],
                "indicators": {"quote": [{
                    "open":   [100.0, null, 102.0],
                    "high":   [101.0, 102.5, 103.0],
                    "low":    [99.5, 100.5, 101.5],
                    "close":  [100.5, 102.0, 102.75],
                    "volume": [1200, 900, null]
                }]}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn chart_bars_with_gaps_are_dropped() {
        let candles = parse_chart(CHART).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close.to_f64(), Some(100.5));
        assert_eq!(candles[0].volume.to_f64(), Some(1200.0));
        assert_eq!(candles[1].close.to_f64(), Some(102.75));
        assert_eq!(candles[1].volume, Decimal::ZERO);
        assert!(candles[0].timestamp < candles[1].timestamp);
    }

    #[test]
    fn chart_not_found_is_an_empty_series() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(parse_chart(body).unwrap().is_empty());
    }

    #[test]
    fn chart_other_errors_are_reported() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input - interval=7m is not supported"}}}"#;
        match parse_chart(body) {
            Err(Error::ApiError { code, .. }) => assert_eq!(code, "Bad Request"),
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn chart_without_timestamps_is_empty() {
        let body = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart(body).unwrap().is_empty());
    }

    #[test]
    fn malformed_chart_is_a_deserialization_error() {
        assert!(matches!(
            parse_chart("<html>blocked</html>"),
            Err(Error::DeserializationFailed(_))
        ));
    }

    #[test]
    fn news_keeps_source_order() {
        let body = r#"{
            "quotes": [],
            "news": [
                {"uuid": "a", "title": "Reliance shares surge on strong results", "publisher": "Reuters", "link": "https://example.com/a"},
                {"uuid": "b", "title": "Markets slip as oil climbs"}
            ]
        }"#;
        let items = parse_news(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Reliance shares surge on strong results");
        assert_eq!(items[0].publisher.as_deref(), Some("Reuters"));
        assert_eq!(items[1].link, None);
    }

    #[test]
    fn missing_news_array_is_empty() {
        assert!(parse_news(r#"{"quotes": []}"#).unwrap().is_empty());
    }

    #[test]
    fn status_error_prefers_yahoo_error_object() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;
        match status_error(StatusCode::UNAUTHORIZED, body) {
            Error::ApiError { code, msg } => {
                assert_eq!(code, "Unauthorized");
                assert_eq!(msg, "Invalid Crumb");
            }
            other => panic!("unexpected {:?}", other),
        }
        match status_error(StatusCode::TOO_MANY_REQUESTS, "Too Many Requests") {
            Error::ApiError { code, .. } => assert_eq!(code, "429"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn client_trims_trailing_slashes() {
        let settings = YahooSettings {
            chart_base_url: "https://query1.finance.yahoo.com/".into(),
            search_base_url: "https://query2.finance.yahoo.com".into(),
            user_agent: "Mozilla/5.0".into(),
            timeout_secs: 5,
            news_count: 8,
        };
        let client = YahooClient::new(&settings).unwrap();
        assert_eq!(client.chart_base_url, "https://query1.finance.yahoo.com");
        assert_eq!(client.news_count, 8);
    }
}
