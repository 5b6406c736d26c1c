//! SQLite Database
//!
//! Journal persistence using rusqlite with r2d2 connection pooling.

use std::path::Path;

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use daily_up_core::{
    CheckIn, CoachResponse, JournalEntry, ResponseSource, SentimentLabel, TimeSlot, Tone,
};

use super::journal::{steps_newest_first, JournalStore};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::database_path;

/// Raw journal row from the database
#[derive(Debug, Clone)]
pub struct JournalRow {
    pub id: String,
    pub timestamp: String,
    pub time_slot: String,
    pub note: String,
    pub tone: String,
    pub sentiment_label: String,
    pub sentiment_score: f64,
    pub analysis: String,
    pub plan_steps: String,
    pub mantra: String,
    pub source: String,
}

impl JournalRow {
    fn from_entry(entry: &JournalEntry) -> AppResult<Self> {
        let check_in = &entry.check_in;
        let response = &entry.response;
        Ok(Self {
            id: check_in.id.clone(),
            timestamp: check_in.timestamp.to_rfc3339(),
            time_slot: check_in.time_slot.as_str().to_string(),
            note: check_in.note.clone(),
            tone: check_in.tone.as_str().to_string(),
            sentiment_label: check_in.sentiment_label.as_str().to_string(),
            sentiment_score: check_in.sentiment_score,
            analysis: response.analysis.clone(),
            plan_steps: serde_json::to_string(&response.plan_steps)?,
            mantra: response.mantra.clone(),
            source: response.source.to_string(),
        })
    }

    fn into_entry(self) -> AppResult<JournalEntry> {
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| AppError::database(format!("Invalid timestamp {}: {}", self.timestamp, e)))?
            .with_timezone(&Utc);
        let time_slot: TimeSlot = self.time_slot.parse()?;
        let tone: Tone = self.tone.parse()?;
        let plan_steps: Vec<String> = serde_json::from_str(&self.plan_steps)?;
        let source = match self.source.as_str() {
            "ai" => ResponseSource::Ai,
            _ => ResponseSource::Fallback,
        };

        Ok(JournalEntry {
            check_in: CheckIn {
                id: self.id,
                timestamp,
                time_slot,
                note: self.note,
                tone,
                sentiment_label: SentimentLabel::coerce(&self.sentiment_label),
                sentiment_score: self.sentiment_score,
            },
            response: CoachResponse {
                analysis: self.analysis,
                plan_steps,
                mantra: self.mantra,
                source,
            },
        })
    }
}

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create an in-memory database for testing.
    ///
    /// Uses an in-memory SQLite database with the same schema as the
    /// production database.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create a new database instance at the default location
    pub fn new() -> AppResult<Self> {
        Self::open(&database_path()?)
    }

    /// Open (or create) a database file with connection pooling
    pub fn open(db_path: &Path) -> AppResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;

        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        // seq preserves insertion order independent of clock skew
        conn.execute(
            "CREATE TABLE IF NOT EXISTS journal (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                timestamp TEXT NOT NULL,
                time_slot TEXT NOT NULL,
                note TEXT NOT NULL,
                tone TEXT NOT NULL,
                sentiment_label TEXT NOT NULL,
                sentiment_score REAL NOT NULL,
                analysis TEXT NOT NULL,
                plan_steps TEXT NOT NULL,
                mantra TEXT NOT NULL,
                source TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Insert a journal row
    pub fn insert_journal_row(&self, row: &JournalRow) -> AppResult<()> {
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO journal (id, timestamp, time_slot, note, tone, sentiment_label,
                                  sentiment_score, analysis, plan_steps, mantra, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                row.id,
                row.timestamp,
                row.time_slot,
                row.note,
                row.tone,
                row.sentiment_label,
                row.sentiment_score,
                row.analysis,
                row.plan_steps,
                row.mantra,
                row.source,
            ],
        )?;
        Ok(())
    }

    /// Fetch journal rows, `newest_first` controlling the order, capped at `limit`
    pub fn get_journal_rows(&self, newest_first: bool, limit: Option<usize>) -> AppResult<Vec<JournalRow>> {
        let conn = self.get_connection()?;
        let order = if newest_first { "DESC" } else { "ASC" };
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = conn.prepare(&format!(
            "SELECT id, timestamp, time_slot, note, tone, sentiment_label, sentiment_score,
                    analysis, plan_steps, mantra, source
             FROM journal
             ORDER BY seq {}
             LIMIT ?1",
            order
        ))?;

        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(JournalRow {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    time_slot: row.get(2)?,
                    note: row.get(3)?,
                    tone: row.get(4)?,
                    sentiment_label: row.get(5)?,
                    sentiment_score: row.get(6)?,
                    analysis: row.get(7)?,
                    plan_steps: row.get(8)?,
                    mantra: row.get(9)?,
                    source: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Count journal entries
    pub fn count_journal_entries(&self) -> AppResult<usize> {
        let conn = self.get_connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM journal", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl JournalStore for Database {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn append(&self, entry: &JournalEntry) -> AppResult<()> {
        self.insert_journal_row(&JournalRow::from_entry(entry)?)
    }

    fn read_all(&self) -> AppResult<Vec<JournalEntry>> {
        self.get_journal_rows(false, None)?
            .into_iter()
            .map(JournalRow::into_entry)
            .collect()
    }

    fn recent_steps(&self, n: usize) -> AppResult<Vec<String>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let entries = self
            .get_journal_rows(true, Some(n))?
            .into_iter()
            .map(JournalRow::into_entry)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(steps_newest_first(entries.iter()))
    }
}
