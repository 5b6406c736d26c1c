//! Coach
//!
//! Generation-backed micro-coach with a deterministic fallback.

pub mod parser;
pub mod prompt;
pub mod service;

pub use parser::{clean_step, extract_json_from_response, parse_coach_reply};
pub use prompt::{build_user_prompt, PromptContext, COACH_SYSTEM_PROMPT};
pub use service::{
    Coach, CoachOutcome, CoachRequest, CoachState, DEFAULT_GENERATION_TIMEOUT,
    DEFAULT_HISTORY_WINDOW,
};
