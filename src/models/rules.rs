//! Coach Rules
//!
//! Tunable thresholds and keyword lists read by the sentiment adapter, the
//! keyword extractor and the rule-based plan selector. Stored under `rules`
//! in config.json.

use serde::{Deserialize, Serialize};

use daily_up_core::SentimentThresholds;

/// Default number of keywords fed to prompts
pub const DEFAULT_MAX_KEYWORDS: usize = 6;

/// Keyword sets and thresholds driving the deterministic coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachRules {
    /// Compound-score cut-offs for the sentiment label
    #[serde(default)]
    pub thresholds: SentimentThresholds,
    /// Substrings selecting the exam/test context
    #[serde(default = "default_exam_keywords")]
    pub exam_keywords: Vec<String>,
    /// Substrings selecting the stress/anxiety context
    #[serde(default = "default_stress_keywords")]
    pub stress_keywords: Vec<String>,
    /// Substrings selecting the physical-activity context
    #[serde(default = "default_activity_keywords")]
    pub activity_keywords: Vec<String>,
    /// Maximum keywords extracted for the topic summary
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_exam_keywords() -> Vec<String> {
    words(&["exam", "examen", "test", "quiz", "revision", "study"])
}

fn default_stress_keywords() -> Vec<String> {
    words(&["stress", "stressed", "anxious", "anxiety", "overwhelmed", "panic"])
}

fn default_activity_keywords() -> Vec<String> {
    words(&["workout", "training", "gym", "sport", "jog", "jogging", "exercise"])
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}

impl Default for CoachRules {
    fn default() -> Self {
        Self {
            thresholds: SentimentThresholds::default(),
            exam_keywords: default_exam_keywords(),
            stress_keywords: default_stress_keywords(),
            activity_keywords: default_activity_keywords(),
            max_keywords: default_max_keywords(),
        }
    }
}

impl CoachRules {
    /// Validate thresholds and keyword lists
    pub fn validate(&self) -> Result<(), String> {
        self.thresholds.validate()?;

        if self.max_keywords == 0 || self.max_keywords > 20 {
            return Err(format!(
                "max_keywords must be between 1 and 20, got {}",
                self.max_keywords
            ));
        }

        for (name, list) in [
            ("exam_keywords", &self.exam_keywords),
            ("stress_keywords", &self.stress_keywords),
            ("activity_keywords", &self.activity_keywords),
        ] {
            if list.iter().any(|k| k.trim().is_empty()) {
                return Err(format!("{} must not contain blank entries", name));
            }
        }

        Ok(())
    }
}
