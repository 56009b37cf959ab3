// In crates/engine/src/lib.rs

use api_client::{CandleSource, HeadlineSource, YahooClient};
use app_config::Settings;
use chrono::Utc;
use core_types::{MarketSnapshot, Symbol};
use sentiment::{AggregatorSettings, LexiconStore, ScorerProvider, SentimentAggregator};
use std::sync::Arc;
use technical::{AnalyzerSettings, TechnicalAnalyzer};

pub mod error;

pub use error::{Error, Result};

/// Produces a `MarketSnapshot` for a symbol by running the technical and sentiment
/// analyses side by side.
pub struct SnapshotAssembler {
    technical: TechnicalAnalyzer,
    sentiment: SentimentAggregator,
    default_symbol: Symbol,
}

impl SnapshotAssembler {
    pub fn new(
        technical: TechnicalAnalyzer,
        sentiment: SentimentAggregator,
        default_symbol: Symbol,
    ) -> Self {
        Self {
            technical,
            sentiment,
            default_symbol,
        }
    }

    /// Wires the assembler to the live Yahoo feeds and the on-disk lexicon.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        // One client (and connection pool) serves both feeds.
        let client = Arc::new(YahooClient::new(&settings.yahoo)?);
        let candles: Arc<dyn CandleSource> = client.clone();
        let headlines: Arc<dyn HeadlineSource> = client;

        let scorers: Arc<dyn ScorerProvider> = Arc::new(LexiconStore::new(
            &settings.sentiment.lexicon_path,
            settings.sentiment.lexicon_url.clone(),
        ));

        let technical =
            TechnicalAnalyzer::new(candles, AnalyzerSettings::try_from(&settings.technical)?);
        let sentiment = SentimentAggregator::new(
            headlines,
            scorers,
            AggregatorSettings::try_from(&settings.sentiment)?,
        );

        tracing::info!(
            symbol = %settings.snapshot.symbol,
            fallbacks = settings.sentiment.fallback_symbols.len(),
            "Snapshot assembler initialized."
        );
        Ok(Self::new(technical, sentiment, settings.snapshot.symbol.clone()))
    }

    pub fn default_symbol(&self) -> &Symbol {
        &self.default_symbol
    }

    /// Builds a snapshot for `symbol`. Each half falls back to its own safe default,
    /// so this always returns.
    pub async fn snapshot(&self, symbol: &Symbol) -> MarketSnapshot {
        tracing::info!(symbol = %symbol, "Assembling market snapshot.");

        let (technical, sentiment) = tokio::join!(
            self.technical.analyze(symbol),
            self.sentiment.aggregate(symbol)
        );

        if technical.is_none() {
            tracing::warn!(symbol = %symbol, "Technical data unavailable for snapshot.");
        }

        MarketSnapshot {
            technical,
            sentiment,
            generated_at: Utc::now(),
        }
    }
}
