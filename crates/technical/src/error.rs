// In crates/technical/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Candle source failed: {0}")]
    Source(#[from] api_client::Error),

    #[error("Not enough bars: need {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Thresholds {oversold}/{overbought} must be symmetric around 50 with oversold below 50")]
    InvalidThresholds { oversold: f64, overbought: f64 },

    #[error("Indicator periods must be greater than 0")]
    InvalidPeriod,

    #[error("Series contains a value that cannot be represented")]
    NonFiniteValue,
}

pub type Result<T> = std::result::Result<T, Error>;
