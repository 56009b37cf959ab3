// In crates/sentiment/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polarity lexicon unavailable: {0}")]
    LexiconUnavailable(String),

    #[error("Failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to download lexicon: {0}")]
    Download(#[from] reqwest::Error),

    #[error("Headline score {0} is not a finite number")]
    NonFiniteScore(f64),

    #[error("Invalid aggregator settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
