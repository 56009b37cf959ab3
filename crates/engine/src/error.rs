// In crates/engine/src/error.rs

use thiserror::Error;

/// Failures while wiring the assembler together. Once built, the assembler itself
/// never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build market data client: {0}")]
    Client(#[from] api_client::Error),

    #[error("Invalid technical settings: {0}")]
    Technical(#[from] technical::Error),

    #[error("Invalid sentiment settings: {0}")]
    Sentiment(#[from] sentiment::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
