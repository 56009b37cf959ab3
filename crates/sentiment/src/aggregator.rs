// In crates/sentiment/src/aggregator.rs

use crate::{Error, Result, ScorerProvider, SentimentScorer};
use api_client::HeadlineSource;
use app_config::SentimentSettings;
use core_types::{Headline, MoodLabel, NewsItem, SentimentSnapshot, Symbol};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    pub fallback_symbols: Vec<Symbol>,
    pub score_limit: usize,
    pub display_limit: usize,
    pub mood_threshold: Decimal,
    pub attempt_delay: Duration,
}

impl TryFrom<&SentimentSettings> for AggregatorSettings {
    type Error = Error;

    fn try_from(settings: &SentimentSettings) -> Result<Self> {
        if settings.score_limit == 0 || settings.display_limit == 0 {
            return Err(Error::InvalidSettings("headline limits must be greater than 0".into()));
        }
        if settings.display_limit > settings.score_limit {
            return Err(Error::InvalidSettings(format!(
                "display_limit {} exceeds score_limit {}",
                settings.display_limit, settings.score_limit
            )));
        }
        let mood_threshold = Decimal::from_f64(settings.mood_threshold)
            .filter(|t| *t > Decimal::ZERO && *t < Decimal::ONE)
            .ok_or_else(|| {
                Error::InvalidSettings(format!(
                    "mood_threshold {} must lie strictly between 0 and 1",
                    settings.mood_threshold
                ))
            })?;

        Ok(Self {
            fallback_symbols: settings.fallback_symbols.clone(),
            score_limit: settings.score_limit,
            display_limit: settings.display_limit,
            mood_threshold,
            attempt_delay: Duration::from_millis(settings.attempt_delay_ms),
        })
    }
}

/// Maps an exact mean score onto a mood. Values on a threshold take its side.
pub fn classify_mood(mean: Decimal, threshold: Decimal) -> MoodLabel {
    if mean >= threshold {
        MoodLabel::Bullish
    } else if mean <= -threshold {
        MoodLabel::Bearish
    } else {
        MoodLabel::Neutral
    }
}

/// Scores recent headlines for a symbol, walking a fallback chain when the primary
/// symbol has no news.
pub struct SentimentAggregator {
    headlines: Arc<dyn HeadlineSource>,
    scorers: Arc<dyn ScorerProvider>,
    settings: AggregatorSettings,
}

impl SentimentAggregator {
    pub fn new(
        headlines: Arc<dyn HeadlineSource>,
        scorers: Arc<dyn ScorerProvider>,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            headlines,
            scorers,
            settings,
        }
    }

    /// The primary symbol followed by the configured fallbacks, without repeats.
    pub fn fallback_chain(&self, primary: &Symbol) -> Vec<Symbol> {
        let mut chain = vec![primary.clone()];
        for symbol in &self.settings.fallback_symbols {
            if !chain.contains(symbol) {
                chain.push(symbol.clone());
            }
        }
        chain
    }

    /// Produces the sentiment snapshot for `primary`. Never fails: faults are logged and
    /// turned into a neutral result.
    pub async fn aggregate(&self, primary: &Symbol) -> SentimentSnapshot {
        let scorer = match self.scorers.scorer().await {
            Ok(scorer) => scorer,
            Err(e) => {
                tracing::error!(symbol = %primary, error = %e, "Sentiment scoring unavailable.");
                return SentimentSnapshot::neutral();
            }
        };

        let Some((symbol, items)) = self.first_with_headlines(primary).await else {
            tracing::warn!(symbol = %primary, "No headlines found for any symbol in the chain.");
            return SentimentSnapshot::no_headlines();
        };

        match self.summarize(symbol, items, scorer.as_ref()) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(symbol = %primary, error = %e, "Failed to summarize headline scores.");
                SentimentSnapshot::neutral()
            }
        }
    }

    async fn first_with_headlines(&self, primary: &Symbol) -> Option<(Symbol, Vec<NewsItem>)> {
        for (attempt, symbol) in self.fallback_chain(primary).into_iter().enumerate() {
            if attempt > 0 && !self.settings.attempt_delay.is_zero() {
                tokio::time::sleep(self.settings.attempt_delay).await;
            }

            let items = match self.headlines.fetch_headlines(&symbol).await {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "Headline fetch failed; trying next symbol.");
                    Vec::new()
                }
            };

            if items.is_empty() {
                tracing::debug!(symbol = %symbol, attempt, "No headlines for symbol.");
                continue;
            }
            tracing::info!(symbol = %symbol, count = items.len(), "Using headlines.");
            return Some((symbol, items));
        }
        None
    }

    fn summarize(
        &self,
        symbol: Symbol,
        items: Vec<NewsItem>,
        scorer: &dyn SentimentScorer,
    ) -> Result<SentimentSnapshot> {
        let mut headlines: Vec<Headline> = items
            .into_iter()
            .take(self.settings.score_limit)
            .map(|item| Headline {
                score: scorer.score(&item.title),
                title: item.title,
                publisher: item.publisher,
                link: item.link,
            })
            .collect();

        let total = headlines.iter().try_fold(Decimal::ZERO, |acc, h| {
            Decimal::from_f64(h.score)
                .map(|s| acc + s)
                .ok_or(Error::NonFiniteScore(h.score))
        })?;
        let mean = total / Decimal::from(headlines.len());
        let label = classify_mood(mean, self.settings.mood_threshold);
        let average_score = mean.round_dp(2);

        headlines.truncate(self.settings.display_limit);

        tracing::debug!(symbol = %symbol, average = %average_score, label = ?label, "Sentiment summarized.");
        Ok(SentimentSnapshot {
            symbol: Some(symbol),
            average_score,
            label,
            headlines,
        })
    }
}
