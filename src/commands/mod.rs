//! CLI Command Handlers
//!
//! Each handler takes the shared [`AppState`](crate::state::AppState) and
//! returns a serializable view; rendering is left to the binary.

pub mod checkin;
pub mod config;
pub mod journal;
pub mod profile;
pub mod prompt;

pub use checkin::{run_checkin, CheckInArgs, CheckInView};
pub use config::{config_path, show_config};
pub use journal::{list_journal, JournalView};
pub use profile::{show_profile, update_profile, ProfileArgs};
pub use prompt::{current_slot, get_prompt, PromptView};
