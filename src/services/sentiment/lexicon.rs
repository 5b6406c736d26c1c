//! Lexicon Scorer
//!
//! Offline rule-based scorer: sums word valences with negation and
//! intensifier handling, then squashes the sum into `[-1, 1]`.

use std::collections::HashMap;
use std::sync::OnceLock;

use async_trait::async_trait;

use daily_up_core::CoreResult;

use super::{RawScore, SentimentScorer};

/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

/// Multiplier applied to a word preceded by a negator
const NEGATION_SCALAR: f64 = -0.74;

/// Magnitude added (or removed) by an intensifier (or dampener)
const BOOST: f64 = 0.293;

/// How many preceding tokens are checked for negation
const NEGATION_WINDOW: usize = 3;

fn valences() -> &'static HashMap<&'static str, f64> {
    static VALENCES: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    VALENCES.get_or_init(|| {
        [
            // positive
            ("good", 1.9),
            ("great", 3.1),
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("excellent", 3.2),
            ("happy", 2.7),
            ("glad", 2.0),
            ("excited", 2.2),
            ("proud", 2.1),
            ("calm", 1.3),
            ("confident", 2.2),
            ("motivated", 1.9),
            ("productive", 1.8),
            ("focused", 1.6),
            ("energized", 2.0),
            ("rested", 1.5),
            ("ready", 1.4),
            ("love", 3.2),
            ("enjoy", 2.2),
            ("enjoyed", 2.2),
            ("fun", 2.3),
            ("nice", 1.8),
            ("fine", 0.8),
            ("better", 1.9),
            ("best", 3.2),
            ("win", 2.8),
            ("won", 2.7),
            ("progress", 1.8),
            ("success", 2.7),
            ("finished", 1.2),
            ("done", 0.9),
            ("hopeful", 1.9),
            ("grateful", 2.0),
            ("relaxed", 2.2),
            ("strong", 2.3),
            ("easy", 1.9),
            ("thanks", 1.9),
            ("yay", 2.4),
            // negative
            ("bad", -2.5),
            ("terrible", -2.1),
            ("awful", -2.0),
            ("horrible", -2.5),
            ("sad", -2.1),
            ("tired", -1.9),
            ("exhausted", -1.5),
            ("stress", -1.8),
            ("stressed", -1.4),
            ("stressful", -2.0),
            ("anxious", -1.0),
            ("anxiety", -0.7),
            ("worried", -1.2),
            ("worry", -1.9),
            ("overwhelmed", -1.5),
            ("panic", -2.3),
            ("afraid", -2.2),
            ("scared", -2.2),
            ("angry", -2.3),
            ("annoyed", -1.6),
            ("frustrated", -2.4),
            ("upset", -1.6),
            ("hate", -2.7),
            ("lazy", -1.5),
            ("stuck", -1.4),
            ("lost", -1.3),
            ("fail", -2.5),
            ("failed", -2.3),
            ("failure", -2.3),
            ("hard", -0.4),
            ("difficult", -1.5),
            ("procrastinating", -1.2),
            ("behind", -0.8),
            ("lonely", -2.0),
            ("bored", -1.1),
            ("sick", -1.7),
            ("hurt", -2.4),
            ("miserable", -2.7),
            ("unmotivated", -1.7),
            ("burnout", -2.2),
            ("ugh", -1.8),
        ]
        .into_iter()
        .collect()
    })
}

fn is_negator(token: &str) -> bool {
    matches!(
        token,
        "not" | "no" | "never" | "none" | "nothing" | "without" | "hardly" | "cannot" | "dont"
            | "cant" | "wont" | "didnt" | "isnt" | "wasnt"
    ) || token.ends_with("n't")
}

/// Boost for a modifier token: positive for intensifiers, negative for dampeners.
fn modifier(token: &str) -> Option<f64> {
    match token {
        "very" | "really" | "so" | "extremely" | "super" | "totally" | "incredibly" | "absolutely"
        | "completely" | "truly" => Some(BOOST),
        "slightly" | "somewhat" | "kinda" | "kindof" | "barely" | "little" | "bit" => Some(-BOOST),
        _ => None,
    }
}

/// Offline word-valence scorer. Always available.
#[derive(Debug, Default, Clone)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    /// Compound score in `[-1, 1]`; `0.0` when no word carries valence.
    pub fn compound(&self, text: &str) -> f64 {
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|t| t.trim_matches('\'').to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let lexicon = valences();
        let mut sum = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = lexicon.get(token.as_str()) else {
                continue;
            };

            let mut valence = base;

            if i > 0 {
                if let Some(boost) = modifier(&tokens[i - 1]) {
                    valence += boost * valence.signum();
                }
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i].iter().any(|t| is_negator(t)) {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }

        if sum == 0.0 {
            0.0
        } else {
            sum / (sum * sum + ALPHA).sqrt()
        }
    }
}

#[async_trait]
impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn score(&self, text: &str) -> CoreResult<RawScore> {
        Ok(RawScore::Compound(self.compound(text)))
    }
}
