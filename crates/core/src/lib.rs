//! DailyUp Core
//!
//! Domain types and the error taxonomy shared by every DailyUp crate. This
//! crate has no knowledge of LLM providers, storage or the CLI.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `checkin` - Time slots, tones and the immutable `CheckIn` record
//! - `sentiment` - Three-way sentiment label and normalized score
//! - `coaching` - `CoachResponse`, plan-step normalization and fallback reasons
//! - `profile` - The user-editable coaching profile
//!
//! ## Design Principles
//!
//! 1. **Small dependency surface** - serde, thiserror, chrono and uuid only
//! 2. **Invariants live on the types** - a `CoachResponse` always carries three steps
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod checkin;
pub mod coaching;
pub mod error;
pub mod profile;
pub mod sentiment;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Check-in Model ─────────────────────────────────────────────────────
pub use checkin::{CheckIn, TimeSlot, Tone};

// ── Sentiment ──────────────────────────────────────────────────────────
pub use sentiment::{Sentiment, SentimentLabel, SentimentThresholds};

// ── Coaching Output ────────────────────────────────────────────────────
pub use coaching::{
    default_analysis, normalize_plan_steps, CoachResponse, FallbackReason, JournalEntry,
    ResponseSource, DEFAULT_MANTRA, FILLER_STEP, PLAN_STEP_COUNT,
};

// ── Profile ────────────────────────────────────────────────────────────
pub use profile::{Profile, DEFAULT_PROFILE_NAME};
