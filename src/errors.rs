//! Unified application error type.
//! All modules (db, core, cli, integrations) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage / migrations
    // ---------------------------
    #[error("storage error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("cannot open timebook {path}: {reason}")]
    Storage { path: String, reason: String },

    #[error("migration failed: {0}")]
    Migration(String),

    // ---------------------------
    // Entry state machine
    // ---------------------------
    #[error("timesheet {0} already active")]
    AlreadyActive(String),

    #[error("timesheet {0} not active")]
    NotActive(String),

    #[error("no timesheet is active")]
    NothingActive,

    #[error("time periods could end up overlapping: {0}")]
    Overlap(String),

    #[error("negative duration: end {end} is before start {start}")]
    NegativeDuration { start: i64, end: i64 },

    #[error("no such entry: {0}")]
    EntryNotFound(i64),

    #[error("timesheet {0} is empty")]
    EmptySheet(String),

    // ---------------------------
    // Lookups
    // ---------------------------
    #[error("no such command \"{0}\"")]
    UnknownCommand(String),

    #[error("ambiguous command \"{token}\": {}", .candidates.join(" "))]
    AmbiguousCommand {
        token: String,
        candidates: Vec<String>,
    },

    #[error("no such timesheet \"{0}\"")]
    UnknownSheet(String),

    #[error("ambiguous timesheet \"{token}\": {}", .candidates.join(" "))]
    AmbiguousSheet {
        token: String,
        candidates: Vec<String>,
    },

    // ---------------------------
    // Parsing
    // ---------------------------
    #[error("{0} is not in a valid time format")]
    InvalidDate(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Help(String),

    // ---------------------------
    // Hooks
    // ---------------------------
    #[error("pre-hook {hook} failed: {reason}")]
    PreHookFailure { hook: String, reason: String },

    #[error("post-hook {hook} failed: {reason}")]
    PostHookFailure { hook: String, reason: String },

    // ---------------------------
    // Config
    // ---------------------------
    #[error("configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Remote collaborators
    // ---------------------------
    #[error("activity report not delivered: {0}")]
    Reporting(String),

    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl From<ureq::Error> for AppError {
    fn from(e: ureq::Error) -> Self {
        AppError::Http(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Io(io::Error::other(e.to_string()))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::InvalidFormat(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
