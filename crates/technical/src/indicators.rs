// In crates/technical/src/indicators.rs

use crate::{Error, Result};
use ta::Next;
use ta::indicators::ExponentialMovingAverage as Ema;

/// Relative Strength Index with Wilder's smoothing, evaluated at the last close.
///
/// The first `period` price changes seed the average gain and loss with their simple
/// mean; every later change is folded in as `(prev * (period - 1) + current) / period`.
/// Needs at least `period + 1` closes.
pub fn wilder_rsi(closes: &[f64], period: usize) -> Result<f64> {
    if period == 0 {
        return Err(Error::InvalidPeriod);
    }
    if closes.len() < period + 1 {
        return Err(Error::InsufficientData {
            required: period + 1,
            actual: closes.len(),
        });
    }
    if closes.iter().any(|c| !c.is_finite()) {
        return Err(Error::NonFiniteValue);
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let (seed, rest) = changes.split_at(period);

    let mut avg_gain = seed.iter().map(|c| c.max(0.0)).sum::<f64>() / period as f64;
    let mut avg_loss = seed.iter().map(|c| (-c).max(0.0)).sum::<f64>() / period as f64;

    let p = period as f64;
    for change in rest {
        avg_gain = (avg_gain * (p - 1.0) + change.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-change).max(0.0)) / p;
    }

    Ok(rsi_from_averages(avg_gain, avg_loss))
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // A flat series has no momentum either way.
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

// Helper trait to easily calculate EMA on a slice of f64
pub trait EmaExt {
    fn ema(&self, period: usize) -> Option<f64>;
}

impl EmaExt for [f64] {
    fn ema(&self, period: usize) -> Option<f64> {
        if period == 0 || self.len() < period {
            return None;
        }
        let mut ema = Ema::new(period).ok()?;
        self.iter().fold(None, |_, v| Some(ema.next(*v)))
    }
}
