//! Row shapes returned by the query layer.
//! These are thin wrappers around SQLite rows.

use serde::Serialize;

/// Running entry of a given sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveInfo {
    pub entry_id: i64,
    pub elapsed: i64,
    pub description: Option<String>,
}

/// Running entry of the current sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentActive {
    pub entry_id: i64,
    pub elapsed: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentStart {
    pub entry_id: i64,
    pub start_time: i64,
}

/// Most recently closed entry of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedEntry {
    pub entry_id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub description: Option<String>,
}

/// One line of `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub sheet: String,
    pub is_current: bool,
    /// Elapsed seconds of the running entry, 0 when idle.
    pub running: i64,
    pub today: i64,
    pub total: i64,
}

/// Cached ticket information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketDetails {
    pub number: i64,
    pub project: String,
    pub details: String,
}
