//! Path Utilities
//!
//! Resolves the DailyUp data directory (`~/.daily-up/` unless `DAILY_UP_HOME`
//! points elsewhere) and the files inside it.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Environment variable overriding the data directory
pub const DAILY_UP_HOME_ENV: &str = "DAILY_UP_HOME";

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the DailyUp directory (`$DAILY_UP_HOME` or `~/.daily-up/`)
pub fn daily_up_dir() -> AppResult<PathBuf> {
    match std::env::var_os(DAILY_UP_HOME_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(home_dir()?.join(".daily-up")),
    }
}

/// Get the config file path (config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(daily_up_dir()?.join("config.json"))
}

/// Get the JSON journal path (journal.json)
pub fn journal_path() -> AppResult<PathBuf> {
    Ok(daily_up_dir()?.join("journal.json"))
}

/// Get the database file path (journal.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(daily_up_dir()?.join("journal.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the DailyUp directory, creating if it doesn't exist
pub fn ensure_daily_up_dir() -> AppResult<PathBuf> {
    let path = daily_up_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
