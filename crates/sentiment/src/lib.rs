// In crates/sentiment/src/lib.rs

pub mod aggregator;
pub mod error;
pub mod lexicon;
pub mod scorer;
pub mod store;

pub use aggregator::{AggregatorSettings, SentimentAggregator, classify_mood};
pub use error::{Error, Result};
pub use lexicon::Lexicon;
pub use scorer::{SentimentScorer, VaderScorer};
pub use store::{LexiconStore, ScorerProvider};
