//! Storage Layer
//!
//! Handles all data persistence: JSON config, JSON/SQLite/memory journals.

pub mod config;
pub mod database;
pub mod journal;

pub use config::*;
pub use database::*;
pub use journal::*;
