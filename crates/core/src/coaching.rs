//! Coaching Output
//!
//! `CoachResponse` and the normalization rules that keep every plan at
//! exactly three steps regardless of where it came from.

use serde::{Deserialize, Serialize};

use crate::checkin::{CheckIn, TimeSlot};
use crate::error::CoreError;

/// Number of steps in every plan.
pub const PLAN_STEP_COUNT: usize = 3;

/// Padding step used when a source returns fewer than three steps.
pub const FILLER_STEP: &str = "Commit to just 5 minutes";

/// Mantra used when a source returns none.
pub const DEFAULT_MANTRA: &str = "Small wins compound";

/// Where a coach response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    /// Parsed from the generation service
    Ai,
    /// Produced by the rule-based selector
    Fallback,
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseSource::Ai => f.pad("ai"),
            ResponseSource::Fallback => f.pad("fallback"),
        }
    }
}

/// Analysis, three-step plan and mantra derived from one check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachResponse {
    pub analysis: String,
    pub plan_steps: Vec<String>,
    pub mantra: String,
    pub source: ResponseSource,
}

impl CoachResponse {
    /// Build a response, enforcing the output invariants.
    ///
    /// Steps are trimmed, blanks dropped, then padded with [`FILLER_STEP`] or
    /// truncated to [`PLAN_STEP_COUNT`]. A blank analysis or mantra is replaced
    /// with the slot default.
    pub fn new(
        slot: TimeSlot,
        analysis: impl Into<String>,
        plan_steps: Vec<String>,
        mantra: impl Into<String>,
        source: ResponseSource,
    ) -> Self {
        let analysis = analysis.into().trim().to_string();
        let mantra = mantra.into().trim().to_string();

        Self {
            analysis: if analysis.is_empty() {
                default_analysis(slot)
            } else {
                analysis
            },
            plan_steps: normalize_plan_steps(plan_steps),
            mantra: if mantra.is_empty() {
                DEFAULT_MANTRA.to_string()
            } else {
                mantra
            },
            source,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ResponseSource::Fallback
    }
}

/// Slot default analysis for a blank upstream analysis.
pub fn default_analysis(slot: TimeSlot) -> String {
    format!("{} — keep it tiny, clear, doable.", slot.title())
}

/// Trim, drop blanks, then pad or truncate to exactly three steps.
pub fn normalize_plan_steps(steps: Vec<String>) -> Vec<String> {
    let mut steps: Vec<String> = steps
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(PLAN_STEP_COUNT)
        .collect();

    while steps.len() < PLAN_STEP_COUNT {
        steps.push(FILLER_STEP.to_string());
    }

    steps
}

/// Why a check-in was answered by the rule-based selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No generation provider is configured
    NoProvider,
    /// The note was blank, so there was nothing to send
    EmptyNote,
    /// Missing credentials, network/API error or timeout
    GenerationUnavailable { message: String },
    /// The service answered but the payload was not a valid coach response
    SchemaViolation { message: String },
}

impl FallbackReason {
    /// One-line notice suitable for showing next to the plan.
    pub fn notice(&self) -> &'static str {
        match self {
            FallbackReason::NoProvider => "No AI provider configured — using smart fallback.",
            FallbackReason::EmptyNote => "Nothing to analyze yet — here is a plan for this moment.",
            FallbackReason::GenerationUnavailable { .. } => {
                "AI unavailable — switched to smart fallback."
            }
            FallbackReason::SchemaViolation { .. } => {
                "AI reply was unusable — switched to smart fallback."
            }
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::NoProvider => write!(f, "no provider configured"),
            FallbackReason::EmptyNote => write!(f, "empty note"),
            FallbackReason::GenerationUnavailable { message } => {
                write!(f, "generation unavailable: {}", message)
            }
            FallbackReason::SchemaViolation { message } => {
                write!(f, "schema violation: {}", message)
            }
        }
    }
}

impl From<CoreError> for FallbackReason {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SchemaViolation(message) => FallbackReason::SchemaViolation { message },
            other => FallbackReason::GenerationUnavailable {
                message: other.to_string(),
            },
        }
    }
}

/// A completed check-in and its response, the unit appended to the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub check_in: CheckIn,
    pub response: CoachResponse,
}

impl JournalEntry {
    pub fn new(check_in: CheckIn, response: CoachResponse) -> Self {
        Self { check_in, response }
    }
}
