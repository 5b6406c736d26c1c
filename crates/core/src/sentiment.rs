//! Sentiment Types
//!
//! The three-way label and signed score every scorer is normalized to.

use serde::{Deserialize, Serialize};

/// Normalized sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }

    /// Coerce an arbitrary scorer label. Unrecognized labels become `Neutral`.
    ///
    /// Accepts the common spellings emitted by classifiers (`POSITIVE`, `pos`,
    /// `LABEL_1`, ...).
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "positive" | "pos" | "label_1" => SentimentLabel::Positive,
            "negative" | "neg" | "label_0" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Compound-score cut-offs for the three-way label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentThresholds {
    /// Scores at or above this are positive
    #[serde(default = "default_positive")]
    pub positive: f64,
    /// Scores at or below this are negative
    #[serde(default = "default_negative")]
    pub negative: f64,
}

fn default_positive() -> f64 {
    0.15
}

fn default_negative() -> f64 {
    -0.15
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive: default_positive(),
            negative: default_negative(),
        }
    }
}

impl SentimentThresholds {
    /// Map a signed compound score to a label.
    pub fn classify(&self, score: f64) -> SentimentLabel {
        if score >= self.positive {
            SentimentLabel::Positive
        } else if score <= self.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.negative >= self.positive {
            return Err(format!(
                "negative threshold ({}) must be below positive threshold ({})",
                self.negative, self.positive
            ));
        }
        if self.positive > 1.0 || self.negative < -1.0 {
            return Err("sentiment thresholds must lie within [-1.0, 1.0]".to_string());
        }
        Ok(())
    }
}

/// A normalized sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Signed compound score in `[-1.0, 1.0]`
    pub score: f64,
}

impl Sentiment {
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        Self { label, score }
    }

    /// `{NEUTRAL, 0.0}`, used for blank input and scorer failures.
    pub fn neutral() -> Self {
        Self::new(SentimentLabel::Neutral, 0.0)
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::neutral()
    }
}
