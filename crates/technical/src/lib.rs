// In crates/technical/src/lib.rs

use api_client::CandleSource;
use core_types::{Candle, Symbol, TechnicalSnapshot};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::sync::Arc;

pub mod error;
pub mod indicators;
pub mod types;

pub use error::{Error, Result};
pub use indicators::{EmaExt, wilder_rsi};
pub use types::{AnalyzerSettings, RsiThresholds};

/// Turns a recent candle series into an RSI reading and a trade signal.
///
/// The analyzer never fails outward: every fault becomes `None` ("not available")
/// after being logged.
pub struct TechnicalAnalyzer {
    source: Arc<dyn CandleSource>,
    settings: AnalyzerSettings,
}

impl TechnicalAnalyzer {
    pub fn new(source: Arc<dyn CandleSource>, settings: AnalyzerSettings) -> Self {
        Self { source, settings }
    }

    /// Fetches the configured lookback window for `symbol` and evaluates it.
    pub async fn analyze(&self, symbol: &Symbol) -> Option<TechnicalSnapshot> {
        let candles = match self
            .source
            .fetch_candles(symbol, &self.settings.lookback, &self.settings.interval)
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                tracing::error!(symbol = %symbol, error = %e, "Failed to fetch candles.");
                return None;
            }
        };

        if candles.is_empty() {
            tracing::warn!(symbol = %symbol, "No candle data returned; technical snapshot unavailable.");
            return None;
        }

        match self.evaluate(symbol, &candles) {
            Ok(snapshot) => {
                tracing::debug!(symbol = %symbol, rsi = %snapshot.rsi, signal = ?snapshot.signal, "Technical snapshot computed.");
                Some(snapshot)
            }
            Err(e) => {
                tracing::error!(symbol = %symbol, bars = candles.len(), error = %e, "Technical analysis failed.");
                None
            }
        }
    }

    /// Computes the snapshot for an already-fetched series (oldest bar first).
    pub fn evaluate(&self, symbol: &Symbol, candles: &[Candle]) -> Result<TechnicalSnapshot> {
        let last = candles.last().ok_or(Error::InsufficientData {
            required: self.settings.rsi_period + 1,
            actual: 0,
        })?;

        let closes = candles
            .iter()
            .map(|c| c.close.to_f64().ok_or(Error::NonFiniteValue))
            .collect::<Result<Vec<f64>>>()?;

        let raw_rsi = wilder_rsi(&closes, self.settings.rsi_period)?;
        // Rounding is for display only; the signal comes from the exact oscillator value.
        let signal = self.settings.thresholds.classify(raw_rsi);
        let ema = closes
            .as_slice()
            .ema(self.settings.ema_period)
            .map(round_2dp)
            .transpose()?;

        Ok(TechnicalSnapshot {
            symbol: symbol.clone(),
            price: last.close.round_dp(2),
            rsi: round_2dp(raw_rsi)?,
            ema,
            signal,
            signal_text: signal.description().to_string(),
        })
    }
}

fn round_2dp(value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or(Error::NonFiniteValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::TradeSignal;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Serves one canned response and records what it was asked for.
    struct FakeCandles {
        response: Mutex<Option<api_client::Result<Vec<Candle>>>>,
        requests: Mutex<Vec<(String, String, String)>>,
    }

    impl FakeCandles {
        fn returning(response: api_client::Result<Vec<Candle>>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(response)),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CandleSource for FakeCandles {
        async fn fetch_candles(
            &self,
            symbol: &Symbol,
            lookback: &str,
            interval: &str,
        ) -> api_client::Result<Vec<Candle>> {
            self.requests
                .lock()
                .unwrap()
                .push((symbol.0.clone(), lookback.into(), interval.into()));
            self.response.lock().unwrap().take().unwrap_or(Ok(Vec::new()))
        }
    }

    /// Builds 5-minute bars from a close series.
    fn bars(closes: &[f64]) -> Vec<Candle> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 3, 45, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let close = Decimal::from_f64(close).unwrap();
                Candle {
                    timestamp: start + Duration::minutes(5 * i as i64),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: dec!(1000),
                }
            })
            .collect()
    }

    /// 20 closes: 100, then the given changes, then flat. Flat bars shrink both Wilder
    /// averages by the same factor, so the RSI is fixed by the first changes alone.
    fn twenty_bars(changes: &[f64]) -> Vec<Candle> {
        let mut closes = vec![100.0];
        for change in changes {
            closes.push(closes.last().unwrap() + change);
        }
        while closes.len() < 20 {
            closes.push(*closes.last().unwrap());
        }
        bars(&closes)
    }

    fn analyzer(source: Arc<FakeCandles>) -> TechnicalAnalyzer {
        TechnicalAnalyzer::new(
            source,
            AnalyzerSettings {
                lookback: "5d".into(),
                interval: "5m".into(),
                rsi_period: 14,
                ema_period: 20,
                thresholds: RsiThresholds::default(),
            },
        )
    }

    fn nifty() -> Symbol {
        Symbol("^NSEI".into())
    }

    #[tokio::test]
    async fn rsi_of_28_is_a_buy() {
        let source = FakeCandles::returning(Ok(twenty_bars(&[7.0, -18.0])));
        let snapshot = analyzer(source.clone()).analyze(&nifty()).await.unwrap();

        assert_eq!(snapshot.rsi, dec!(28.00));
        assert_eq!(snapshot.signal, TradeSignal::Buy);
        assert_eq!(snapshot.price, dec!(89.00));
        assert_eq!(
            source.requests.lock().unwrap().as_slice(),
            &[("^NSEI".to_string(), "5d".to_string(), "5m".to_string())]
        );
    }

    #[tokio::test]
    async fn rsi_of_72_is_a_sell() {
        let source = FakeCandles::returning(Ok(twenty_bars(&[18.0, -7.0])));
        let snapshot = analyzer(source).analyze(&nifty()).await.unwrap();

        assert_eq!(snapshot.rsi, dec!(72.00));
        assert_eq!(snapshot.signal, TradeSignal::Sell);
    }

    #[tokio::test]
    async fn rsi_of_50_is_neutral() {
        let source = FakeCandles::returning(Ok(twenty_bars(&[10.0, -10.0])));
        let snapshot = analyzer(source).analyze(&nifty()).await.unwrap();

        assert_eq!(snapshot.rsi, dec!(50.00));
        assert_eq!(snapshot.signal, TradeSignal::Neutral);
        assert!(snapshot.ema.is_some());
    }

    #[tokio::test]
    async fn signal_follows_the_exact_rsi_not_the_rounded_one() {
        // Raw RSI is 29.9997: reported as 30.00 but still below the oversold line.
        let source = FakeCandles::returning(Ok(twenty_bars(&[3.0, -7.0001])));
        let snapshot = analyzer(source).analyze(&nifty()).await.unwrap();

        assert_eq!(snapshot.rsi, dec!(30.00));
        assert_eq!(snapshot.signal, TradeSignal::Buy);
        assert_eq!(snapshot.signal_text, "OVERSOLD (BUY)");
    }

    #[tokio::test]
    async fn empty_series_is_not_available() {
        let source = FakeCandles::returning(Ok(Vec::new()));
        assert!(analyzer(source).analyze(&nifty()).await.is_none());
    }

    #[tokio::test]
    async fn source_failure_is_not_available() {
        let source = FakeCandles::returning(Err(api_client::Error::DataUnavailable(
            "chart response has no quote block".into(),
        )));
        assert!(analyzer(source).analyze(&nifty()).await.is_none());
    }

    #[tokio::test]
    async fn undersized_series_is_not_available() {
        let source = FakeCandles::returning(Ok(bars(&[100.0; 10])));
        assert!(analyzer(source).analyze(&nifty()).await.is_none());
    }

    #[test]
    fn ema_is_omitted_when_series_is_shorter_than_its_period() {
        let source = FakeCandles::returning(Ok(Vec::new()));
        let closes = [
            100.0, 101.0, 102.5, 101.0, 103.25, 104.0, 103.0, 102.0, 101.5, 102.0, 103.0, 104.5,
            104.0, 105.0, 106.125, 106.0,
        ];
        let snapshot = analyzer(source)
            .evaluate(&nifty(), &bars(&closes))
            .unwrap();
        assert_eq!(snapshot.ema, None);
        assert_eq!(snapshot.price, dec!(106.00));
    }

    #[test]
    fn reported_values_are_rounded_to_two_places() {
        let source = FakeCandles::returning(Ok(Vec::new()));
        let mut closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 7) as f64 * 0.37).collect();
        closes.push(101.23456);
        let snapshot = analyzer(source).evaluate(&nifty(), &bars(&closes)).unwrap();
        assert_eq!(snapshot.price, dec!(101.23));
        assert!(snapshot.rsi.scale() <= 2);
        assert!(snapshot.ema.unwrap().scale() <= 2);
    }
}
