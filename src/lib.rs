//! DailyUp - Micro-Coach Library
//!
//! Turns a short free-text check-in into an analysis, a three-step micro-plan
//! and a mantra. It includes:
//! - CLI command handlers
//! - Coaching services (keywords, sentiment, rule-based fallback, LLM coach)
//! - Storage layer (config file, JSON/SQLite/in-memory journal)
//! - Data models and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use commands::{
    config_path, current_slot, get_prompt, list_journal, run_checkin, show_config, show_profile,
    update_profile, CheckInArgs, CheckInView, JournalView, ProfileArgs, PromptView,
};
pub use models::response::CommandResponse;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::coach::{Coach, CoachOutcome, CoachRequest};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
