//! SQLite connection wrapper (lightweight for CLI usage): one connection per
//! invocation, IMMEDIATE transactions for writers.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

/// How long a writer waits for another process' write lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

pub struct DbPool {
    pub conn: Connection,
    pub path: String,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        if let Some(dir) = Path::new(path).parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir).map_err(|e| AppError::Storage {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(Path::new(path)).map_err(|e| AppError::Storage {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::configure(&conn).map_err(|e| AppError::Storage {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        Ok(Self {
            conn,
            path: ":memory:".to_string(),
        })
    }

    fn configure(conn: &Connection) -> rusqlite::Result<()> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    }

    /// Run `func` inside BEGIN IMMEDIATE … COMMIT. Any error rolls the
    /// transaction back and is handed to the caller unchanged.
    pub fn with_transaction<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        match func(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rb) = tx.rollback() {
                    log::error!("rollback failed after \"{}\": {}", e, rb);
                }
                Err(e)
            }
        }
    }

    /// Highest applied migration number; 0 for a fresh store.
    pub fn current_version(&self) -> AppResult<i64> {
        current_version(&self.conn)
    }
}

pub fn current_version(conn: &Connection) -> AppResult<i64> {
    let has_meta: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'meta'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if has_meta.is_none() {
        return Ok(0);
    }

    let raw: Option<String> = conn
        .query_row(
            "SELECT CAST(value AS TEXT) FROM meta WHERE key = 'db_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    match raw {
        None => Ok(0),
        Some(v) => v
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::Migration(format!("corrupt db_version value '{}'", v))),
    }
}
