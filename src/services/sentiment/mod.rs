//! Sentiment Adapter
//!
//! Wraps a pluggable polarity scorer and normalizes whatever it returns to a
//! three-way label plus signed compound score. Scorer failures never escape:
//! they are logged and read as neutral.

pub mod huggingface;
pub mod lexicon;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use daily_up_core::{CoreError, CoreResult, Sentiment, SentimentLabel, SentimentThresholds};

use crate::models::settings::{SentimentBackend, SentimentSettings};
use crate::utils::error::AppResult;

pub use huggingface::HuggingFaceScorer;
pub use lexicon::LexiconScorer;

/// Text is cut to this many characters before scoring
pub const MAX_SCORED_CHARS: usize = 512;

/// What a scorer produced, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawScore {
    /// Continuous compound score, nominally in `[-1.0, 1.0]`
    Compound(f64),
    /// Classifier output: a label and its confidence in `[0.0, 1.0]`
    Labelled { label: String, confidence: f64 },
}

/// External polarity scorer.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Scorer name for logs
    fn name(&self) -> &'static str;

    /// Score non-empty text. Errors are `CoreError::ScoringUnavailable`.
    async fn score(&self, text: &str) -> CoreResult<RawScore>;
}

/// Normalizes scorer output against the configured thresholds.
pub struct SentimentAnalyzer {
    scorer: Arc<dyn SentimentScorer>,
    thresholds: SentimentThresholds,
    timeout: Option<Duration>,
}

impl SentimentAnalyzer {
    pub fn new(scorer: Arc<dyn SentimentScorer>, thresholds: SentimentThresholds) -> Self {
        Self {
            scorer,
            thresholds,
            timeout: None,
        }
    }

    /// Bound each scorer call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Score `text`, returning `{NEUTRAL, 0.0}` for blank input or any scorer failure.
    pub async fn analyze(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::neutral();
        }

        let truncated = truncate_chars(text, MAX_SCORED_CHARS);

        let result = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, self.scorer.score(truncated)).await {
                Ok(result) => result,
                Err(_) => Err(CoreError::scoring_unavailable(format!(
                    "{} timed out after {}s",
                    self.scorer.name(),
                    timeout.as_secs()
                ))),
            },
            None => self.scorer.score(truncated).await,
        };

        match result {
            Ok(raw) => {
                let sentiment = self.normalize(raw);
                debug!(
                    scorer = self.scorer.name(),
                    label = %sentiment.label,
                    score = sentiment.score,
                    "Scored note"
                );
                sentiment
            }
            Err(e) => {
                warn!(scorer = self.scorer.name(), error = %e, "Sentiment scorer failed, using neutral");
                Sentiment::neutral()
            }
        }
    }

    /// Map raw scorer output to a signed score, then derive the label from the thresholds.
    pub fn normalize(&self, raw: RawScore) -> Sentiment {
        let score = match raw {
            RawScore::Compound(score) => score,
            RawScore::Labelled { label, confidence } => match SentimentLabel::coerce(&label) {
                SentimentLabel::Positive => confidence,
                SentimentLabel::Negative => -confidence,
                SentimentLabel::Neutral => 0.0,
            },
        };

        let score = if score.is_finite() {
            score.clamp(-1.0, 1.0)
        } else {
            0.0
        };

        Sentiment::new(self.thresholds.classify(score), score)
    }
}

/// Cut `text` to at most `max` characters on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the scorer selected by the settings.
pub fn build_scorer(settings: &SentimentSettings) -> AppResult<Arc<dyn SentimentScorer>> {
    let scorer: Arc<dyn SentimentScorer> = match settings.backend {
        SentimentBackend::Lexicon => Arc::new(LexiconScorer::new()),
        SentimentBackend::HuggingFace => Arc::new(HuggingFaceScorer::new(
            settings.model.clone(),
            settings.base_url.clone(),
            settings.api_token(),
            Duration::from_secs(settings.request_timeout_secs),
        )?),
    };
    Ok(scorer)
}
