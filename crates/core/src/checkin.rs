//! Check-in Model
//!
//! Time-of-day slots, coach tones and the immutable `CheckIn` record created
//! on every submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::sentiment::{Sentiment, SentimentLabel};

/// Time-of-day slot selecting which prompt and default plan applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Midday,
    Evening,
}

impl TimeSlot {
    /// All slots in display order.
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Midday, TimeSlot::Evening];

    /// Lowercase identifier used in prompts and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Midday => "midday",
            TimeSlot::Evening => "evening",
        }
    }

    /// Capitalized form for user-facing text ("Morning").
    pub fn title(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Midday => "Midday",
            TimeSlot::Evening => "Evening",
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeSlot::Morning),
            "midday" => Ok(TimeSlot::Midday),
            "evening" => Ok(TimeSlot::Evening),
            other => Err(CoreError::validation(format!(
                "Invalid time slot: {}. Must be 'morning', 'midday', or 'evening'",
                other
            ))),
        }
    }
}

/// Coach voice preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Supportive,
    Direct,
    Playful,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Neutral, Tone::Supportive, Tone::Direct, Tone::Playful];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Supportive => "supportive",
            Tone::Direct => "direct",
            Tone::Playful => "playful",
        }
    }

    /// Style phrase interpolated into generation prompts.
    pub fn style(&self) -> &'static str {
        match self {
            Tone::Neutral => "calm and concise",
            Tone::Supportive => "warm and encouraging",
            Tone::Direct => "clear and no-nonsense",
            Tone::Playful => "light, upbeat and friendly",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(Tone::Neutral),
            "supportive" => Ok(Tone::Supportive),
            "direct" => Ok(Tone::Direct),
            "playful" => Ok(Tone::Playful),
            other => Err(CoreError::validation(format!(
                "Invalid tone: {}. Must be one of neutral, supportive, direct, playful",
                other
            ))),
        }
    }
}

/// A single user submission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub time_slot: TimeSlot,
    pub note: String,
    pub tone: Tone,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
}

impl CheckIn {
    /// Record a check-in stamped with the current time and a fresh id.
    pub fn new(time_slot: TimeSlot, note: impl Into<String>, tone: Tone, sentiment: Sentiment) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            time_slot,
            note: note.into(),
            tone,
            sentiment_label: sentiment.label,
            sentiment_score: sentiment.score,
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        Sentiment {
            label: self.sentiment_label,
            score: self.sentiment_score,
        }
    }
}
