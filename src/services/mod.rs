//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by commands.

pub mod coach;
pub mod fallback;
pub mod keywords;
pub mod prompts;
pub mod sentiment;

pub use coach::{Coach, CoachOutcome, CoachRequest, CoachState};
pub use fallback::{CoachContext, FallbackCoach, FallbackRequest};
pub use keywords::{extract_keywords, topic_summary, TOPIC_PLACEHOLDER};
pub use prompts::{nudge, pick_prompt, CheckInPrompt};
pub use sentiment::{
    build_scorer, HuggingFaceScorer, LexiconScorer, RawScore, SentimentAnalyzer, SentimentScorer,
};
