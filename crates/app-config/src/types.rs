// In crates/app-config/src/types.rs

use core_types::Symbol;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// What the default snapshot is taken of.
    pub snapshot: SnapshotSettings,
    /// Settings for the Yahoo Finance feeds.
    pub yahoo: YahooSettings,
    #[serde(default)]
    pub technical: TechnicalSettings,
    #[serde(default)]
    pub sentiment: SentimentSettings,
    pub server: ServerSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SnapshotSettings {
    /// The instrument shown when a request does not name one.
    pub symbol: Symbol,
}

#[derive(Deserialize, Debug, Clone)]
pub struct YahooSettings {
    /// Base URL of the chart (candle) API.
    pub chart_base_url: String,
    /// Base URL of the search API, which also carries news.
    pub search_base_url: String,
    /// Sent on every request; the feeds reject obvious non-browser clients.
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many news items to request per symbol.
    #[serde(default = "default_news_count")]
    pub news_count: u32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TechnicalSettings {
    /// How far back to fetch bars (e.g. "5d").
    pub lookback: String,
    /// Bar interval (e.g. "5m").
    pub interval: String,
    pub rsi_period: u32,
    pub ema_period: u32,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for TechnicalSettings {
    fn default() -> Self {
        Self {
            lookback: "5d".into(),
            interval: "5m".into(),
            rsi_period: 14,
            ema_period: 20,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SentimentSettings {
    /// Tried in order after the primary symbol when it has no headlines.
    pub fallback_symbols: Vec<Symbol>,
    /// How many headlines feed the average.
    pub score_limit: usize,
    /// How many headlines are returned for display.
    pub display_limit: usize,
    /// Mean scores at or beyond +/- this value are bullish/bearish.
    pub mood_threshold: f64,
    /// Pause between chain attempts, in milliseconds.
    pub attempt_delay_ms: u64,
    /// Where the polarity lexicon lives on disk.
    pub lexicon_path: String,
    /// Where to download the lexicon from when it is missing locally.
    pub lexicon_url: String,
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self {
            fallback_symbols: vec![Symbol("RELIANCE.NS".into())],
            score_limit: 8,
            display_limit: 5,
            mood_threshold: 0.05,
            attempt_delay_ms: 500,
            lexicon_path: "data/vader_lexicon.txt".into(),
            lexicon_url:
                "https://raw.githubusercontent.com/cjhutto/vaderSentiment/master/vaderSentiment/vader_lexicon.txt"
                    .into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Helper functions for serde defaults
fn default_timeout_secs() -> u64 {
    10
}
fn default_news_count() -> u32 {
    10
}
