// In crates/sentiment/src/lexicon.rs

use crate::{Error, Result};
use std::collections::HashMap;

/// A read-only mapping from lowercase tokens to valence weights (roughly -4..=4).
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    /// Parses the VADER lexicon format: `token<TAB>mean<TAB>std<TAB>[ratings]`.
    ///
    /// Blank lines, `#` comments and lines without a numeric mean are skipped.
    /// A text with no usable entries is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let mut valences = HashMap::new();
        let mut skipped = 0usize;

        for line in text.lines() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let token = fields.next().map(str::trim).unwrap_or_default();
            let valence = fields.next().and_then(|v| v.trim().parse::<f64>().ok());

            match valence {
                Some(v) if !token.is_empty() && v.is_finite() => {
                    valences.insert(token.to_lowercase(), v);
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "Skipped malformed lexicon lines.");
        }
        if valences.is_empty() {
            return Err(Error::LexiconUnavailable("lexicon contains no entries".into()));
        }

        Ok(Self { valences })
    }

    /// Builds a lexicon from explicit entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let valences = entries
            .into_iter()
            .map(|(token, v)| (token.as_ref().to_lowercase(), v))
            .collect();
        Self { valences }
    }

    /// Looks up an already-lowercased token.
    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    pub(crate) fn len(&self) -> usize {
        self.valences.len()
    }
}
