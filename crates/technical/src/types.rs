// In crates/technical/src/types.rs

use crate::{Error, Result};
use app_config::TechnicalSettings;
use core_types::TradeSignal;

/// The oversold/overbought pair used to discretize the RSI.
///
/// Always symmetric around 50: `overbought == 100 - oversold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiThresholds {
    oversold: f64,
    overbought: f64,
}

impl RsiThresholds {
    pub fn new(oversold: f64, overbought: f64) -> Result<Self> {
        let symmetric = (oversold + overbought - 100.0).abs() <= f64::EPSILON;
        if !(oversold > 0.0 && oversold < 50.0) || !symmetric {
            return Err(Error::InvalidThresholds {
                oversold,
                overbought,
            });
        }
        Ok(Self {
            oversold,
            overbought,
        })
    }

    /// Values on a threshold are neutral.
    pub fn classify(&self, rsi: f64) -> TradeSignal {
        if rsi < self.oversold {
            TradeSignal::Buy
        } else if rsi > self.overbought {
            TradeSignal::Sell
        } else {
            TradeSignal::Neutral
        }
    }
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

/// Everything the analyzer needs besides its data source.
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub lookback: String,
    pub interval: String,
    pub rsi_period: usize,
    pub ema_period: usize,
    pub thresholds: RsiThresholds,
}

impl TryFrom<&TechnicalSettings> for AnalyzerSettings {
    type Error = Error;

    fn try_from(settings: &TechnicalSettings) -> Result<Self> {
        if settings.rsi_period == 0 || settings.ema_period == 0 {
            return Err(Error::InvalidPeriod);
        }
        Ok(Self {
            lookback: settings.lookback.clone(),
            interval: settings.interval.clone(),
            rsi_period: settings.rsi_period as usize,
            ema_period: settings.ema_period as usize,
            thresholds: RsiThresholds::new(settings.oversold, settings.overbought)?,
        })
    }
}
