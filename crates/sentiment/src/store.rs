// In crates/sentiment/src/store.rs

use crate::{Error, Lexicon, Result, SentimentScorer, VaderScorer};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Hands out a ready-to-use scorer, loading whatever it depends on first.
#[async_trait]
pub trait ScorerProvider: Send + Sync {
    async fn scorer(&self) -> Result<Arc<dyn SentimentScorer>>;
}

/// Owns the process-wide polarity lexicon and initializes it exactly once.
///
/// The first caller reads `path`; if the file does not exist it is downloaded from `url`
/// and written back to `path` for the next start. Concurrent first callers wait on the
/// same initialization. A failed initialization leaves the store empty, so the next
/// caller tries again.
pub struct LexiconStore {
    path: PathBuf,
    url: String,
    http_client: reqwest::Client,
    lexicon: OnceCell<Arc<Lexicon>>,
}

impl LexiconStore {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            lexicon: OnceCell::new(),
        }
    }

    /// A store that is already initialized; it never touches the disk or network.
    pub fn preloaded(lexicon: Lexicon) -> Self {
        Self {
            path: PathBuf::new(),
            url: String::new(),
            http_client: reqwest::Client::new(),
            lexicon: OnceCell::new_with(Some(Arc::new(lexicon))),
        }
    }

    #[cfg(test)]
    fn is_loaded(&self) -> bool {
        self.lexicon.initialized()
    }

    /// Returns the lexicon, loading it on first use.
    pub async fn get(&self) -> Result<Arc<Lexicon>> {
        self.lexicon
            .get_or_try_init(|| self.load())
            .await
            .cloned()
            .map_err(|e| match e {
                Error::LexiconUnavailable(_) => e,
                other => Error::LexiconUnavailable(other.to_string()),
            })
    }

    async fn load(&self) -> Result<Arc<Lexicon>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), url = %self.url, "Polarity lexicon not found locally. Downloading...");
                let text = self.download().await?;
                persist(&self.path, &text).await;
                text
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let lexicon = Lexicon::parse(&text)?;
        tracing::info!(entries = lexicon.len(), "Polarity lexicon loaded.");
        Ok(Arc::new(lexicon))
    }

    async fn download(&self) -> Result<String> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Best-effort cache write; a read-only filesystem only costs a re-download next start.
async fn persist(path: &Path, text: &str) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            tracing::warn!(path = %parent.display(), error = %e, "Could not create lexicon directory.");
            return;
        }
    }
    if let Err(e) = tokio::fs::write(path, text).await {
        tracing::warn!(path = %path.display(), error = %e, "Could not cache downloaded lexicon.");
    }
}

#[async_trait]
impl ScorerProvider for LexiconStore {
    async fn scorer(&self) -> Result<Arc<dyn SentimentScorer>> {
        let lexicon = self.get().await?;
        Ok(Arc::new(VaderScorer::new(lexicon)))
    }
}
