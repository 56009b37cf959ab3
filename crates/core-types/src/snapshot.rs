// In crates/core-types/src/snapshot.rs

use crate::Symbol;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The discretized trade signal derived from the RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSignal {
    /// RSI below the oversold threshold.
    Buy,
    /// RSI above the overbought threshold.
    Sell,
    Neutral,
}

impl TradeSignal {
    /// Human-readable text for the display layer.
    pub fn description(&self) -> &'static str {
        match self {
            TradeSignal::Buy => "OVERSOLD (BUY)",
            TradeSignal::Sell => "OVERBOUGHT (SELL)",
            TradeSignal::Neutral => "NEUTRAL",
        }
    }
}

/// The aggregate market mood derived from headline sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoodLabel {
    Bullish,
    Bearish,
    Neutral,
}

/// The technical half of a snapshot. All numbers are rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub symbol: Symbol,
    /// Close of the most recent bar.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rsi: Decimal,
    /// Trend context line; `None` when the series is shorter than the EMA period.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub ema: Option<Decimal>,
    pub signal: TradeSignal,
    /// `signal.description()`, carried so the display layer needs no lookup table.
    pub signal_text: String,
}

/// A scored headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    /// Compound polarity in [-1, 1].
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub link: Option<String>,
}

/// The sentiment half of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    /// The chain candidate whose headlines were used, if any.
    pub symbol: Option<Symbol>,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_score: Decimal,
    pub label: MoodLabel,
    pub headlines: Vec<Headline>,
}

impl SentimentSnapshot {
    pub const NO_HEADLINES_TITLE: &'static str = "No recent headlines available";

    /// The result used when a fault prevented any scoring.
    pub fn neutral() -> Self {
        Self {
            symbol: None,
            average_score: Decimal::ZERO,
            label: MoodLabel::Neutral,
            headlines: Vec::new(),
        }
    }

    /// The result used when every candidate in the chain came back empty. It carries a
    /// single placeholder entry so the display never renders a blank list.
    pub fn no_headlines() -> Self {
        Self {
            headlines: vec![Headline {
                title: Self::NO_HEADLINES_TITLE.to_string(),
                score: 0.0,
                publisher: None,
                link: None,
            }],
            ..Self::neutral()
        }
    }
}

/// The structure handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub technical: Option<TechnicalSnapshot>,
    pub sentiment: SentimentSnapshot,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn signal_serializes_as_upper_case() {
        let json = serde_json::to_string(&TradeSignal::Buy).unwrap();
        assert_eq!(json, "\"BUY\"");
        assert_eq!(TradeSignal::Sell.description(), "OVERBOUGHT (SELL)");
    }

    #[test]
    fn no_headlines_snapshot_carries_placeholder() {
        let snapshot = SentimentSnapshot::no_headlines();
        assert_eq!(snapshot.average_score, Decimal::ZERO);
        assert_eq!(snapshot.label, MoodLabel::Neutral);
        assert_eq!(snapshot.headlines.len(), 1);
        assert_eq!(snapshot.headlines[0].title, SentimentSnapshot::NO_HEADLINES_TITLE);
    }

    #[test]
    fn technical_snapshot_serializes_numbers_as_floats() {
        let snapshot = TechnicalSnapshot {
            symbol: Symbol("^NSEI".into()),
            price: dec!(22350.15),
            rsi: dec!(28.5),
            ema: None,
            signal: TradeSignal::Buy,
            signal_text: TradeSignal::Buy.description().to_string(),
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["price"], serde_json::json!(22350.15));
        assert_eq!(value["rsi"], serde_json::json!(28.5));
        assert_eq!(value["signal"], "BUY");
        assert_eq!(value["signal_text"], "OVERSOLD (BUY)");
        assert!(value["ema"].is_null());
    }
}
