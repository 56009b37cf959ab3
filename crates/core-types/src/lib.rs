// In crates/core-types/src/lib.rs

pub mod error;
pub mod snapshot;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use snapshot::{
    Headline, MarketSnapshot, MoodLabel, SentimentSnapshot, TechnicalSnapshot, TradeSignal,
};
pub use types::{Candle, NewsItem, Symbol};
