// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;

/// The client for the Yahoo Finance chart and search endpoints.
#[derive(Debug, Clone)]
pub struct YahooClient {
    /// The persistent HTTP client (carries the browser-like user agent).
    pub http_client: Client,
    /// Base URL of the chart API.
    pub chart_base_url: String,
    /// Base URL of the search API.
    pub search_base_url: String,
    /// Number of news items requested per symbol.
    pub news_count: u32,
}

/// Top-level body of `GET /v8/finance/chart/{symbol}`.
#[derive(Debug, Deserialize)]
pub struct RawChartResponse {
    pub chart: RawChart,
}

#[derive(Debug, Deserialize)]
pub struct RawChart {
    #[serde(default)]
    pub result: Option<Vec<RawChartResult>>,
    #[serde(default)]
    pub error: Option<RawApiError>,
}

/// Yahoo's error object, e.g. `{"code": "Not Found", "description": "..."}`.
#[derive(Debug, Deserialize)]
pub struct RawApiError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct RawChartResult {
    /// Bar open times in unix seconds. Absent when the range holds no bars.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: RawIndicators,
}

#[derive(Debug, Deserialize)]
pub struct RawIndicators {
    #[serde(default)]
    pub quote: Vec<RawQuote>,
}

/// Column-oriented OHLCV arrays. Individual entries are null for gaps.
#[derive(Debug, Deserialize, Default)]
pub struct RawQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

/// Top-level body of `GET /v1/finance/search`.
#[derive(Debug, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub news: Vec<RawNewsItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawNewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}
