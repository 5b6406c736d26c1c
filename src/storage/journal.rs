//! Journal Stores
//!
//! Append-only persistence of `JournalEntry` values. Three backends share the
//! `JournalStore` trait: a JSON file, SQLite (see `database.rs`) and memory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde_json::Value;
use tracing::warn;

use daily_up_core::JournalEntry;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// Append-only journal of completed check-ins.
///
/// Entries come back in insertion order.
pub trait JournalStore: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Append one entry
    fn append(&self, entry: &JournalEntry) -> AppResult<()>;

    /// Read every entry, oldest first
    fn read_all(&self) -> AppResult<Vec<JournalEntry>>;

    /// Plan steps of the last `n` entries, newest entry first.
    fn recent_steps(&self, n: usize) -> AppResult<Vec<String>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let entries = self.read_all()?;
        Ok(steps_newest_first(entries.iter().rev().take(n)))
    }
}

/// Flatten plan steps from entries already ordered newest first.
pub(crate) fn steps_newest_first<'a>(entries: impl Iterator<Item = &'a JournalEntry>) -> Vec<String> {
    entries
        .flat_map(|e| e.response.plan_steps.iter().cloned())
        .collect()
}

/// Journal stored as one pretty-printed JSON array.
///
/// Records are kept as raw JSON so an append never drops a record it cannot
/// decode. `read_all` skips such records. A file that is not a JSON array at
/// all is moved aside to a timestamped `.bak` before the next append.
#[derive(Debug)]
pub struct JsonJournal {
    path: PathBuf,
    write_lock: Mutex<()>,
}

/// What the journal file held on disk.
enum RawJournal {
    Missing,
    Records(Vec<Value>),
    Unreadable(String),
}

impl JsonJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_raw(&self) -> AppResult<RawJournal> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RawJournal::Missing),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(RawJournal::Missing);
        }

        Ok(match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(records) => RawJournal::Records(records),
            Err(e) => RawJournal::Unreadable(e.to_string()),
        })
    }

    /// Move an unreadable journal file out of the way, keeping its bytes.
    fn back_up(&self) -> AppResult<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "journal.json".to_string());
        let backup = self.path.with_file_name(format!(
            "{}.{}.bak",
            file_name,
            Utc::now().format("%Y%m%dT%H%M%S%.3f")
        ));
        fs::rename(&self.path, &backup)?;
        Ok(backup)
    }

    /// Write through a sibling temp file so a crash never leaves half an array.
    fn write_records(&self, records: &[Value]) -> AppResult<()> {
        let content = serde_json::to_string_pretty(records)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl JournalStore for JsonJournal {
    fn name(&self) -> &'static str {
        "json"
    }

    fn append(&self, entry: &JournalEntry) -> AppResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| AppError::internal(format!("Journal lock poisoned: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }

        let mut records = match self.load_raw()? {
            RawJournal::Missing => Vec::new(),
            RawJournal::Records(records) => records,
            RawJournal::Unreadable(error) => {
                let backup = self.back_up()?;
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %error,
                    "Journal file is not a JSON array, moved aside"
                );
                Vec::new()
            }
        };

        records.push(serde_json::to_value(entry)?);
        self.write_records(&records)
    }

    fn read_all(&self) -> AppResult<Vec<JournalEntry>> {
        let records = match self.load_raw()? {
            RawJournal::Missing => return Ok(Vec::new()),
            RawJournal::Records(records) => records,
            RawJournal::Unreadable(error) => {
                warn!(
                    path = %self.path.display(),
                    error = %error,
                    "Journal file is not a JSON array, reading as empty"
                );
                return Ok(Vec::new());
            }
        };

        let mut entries = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<JournalEntry>(record) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(index, error = %e, "Skipping unreadable journal record"),
            }
        }
        Ok(entries)
    }
}

/// Journal that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    entries: Mutex<Vec<JournalEntry>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JournalStore for MemoryJournal {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn append(&self, entry: &JournalEntry) -> AppResult<()> {
        self.entries
            .lock()
            .map_err(|e| AppError::internal(format!("Journal lock poisoned: {}", e)))?
            .push(entry.clone());
        Ok(())
    }

    fn read_all(&self) -> AppResult<Vec<JournalEntry>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| AppError::internal(format!("Journal lock poisoned: {}", e)))?;
        Ok(entries.clone())
    }
}
