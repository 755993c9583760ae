//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The tracking service calls store methods; it never executes SQL directly.
//!
//! One connection per command invocation. No pooling, no concurrent
//! writers; SQLite's default locking is all the coordination needed.

use crate::{error::TrackResult, types::MobileNumber};
use chrono::{DateTime, Utc};
use rusqlite::{types::Type, Connection, Row};

mod complaint;
mod tracked;

pub struct LookupStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl LookupStore {
    pub fn open(path: &str) -> TrackResult<Self> {
        if path == ":memory:" {
            return Self::in_memory();
        }
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only matters for real files; a failure here is not fatal.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::debug!("opened lookup store at {path}");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> TrackResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, path: None })
    }

    /// Open and bring the schema up to date in one step.
    pub fn open_migrated(path: &str) -> TrackResult<Self> {
        let store = Self::open(path)?;
        store.migrate()?;
        Ok(store)
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases this returns a fresh, empty database.
    pub fn reopen(&self) -> TrackResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply all schema migrations in order. Safe to run repeatedly.
    pub fn migrate(&self) -> TrackResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_lookup.sql"))?;
        Ok(())
    }
}

// ── Column helpers ─────────────────────────────────────────────────

fn to_millis(at: &DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn number_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<MobileNumber> {
    let raw: String = row.get(idx)?;
    MobileNumber::parse(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {millis}").into(),
        )
    })
}
