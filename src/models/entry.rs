use regex::Regex;
use rusqlite::Row;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Key/value annotations of an entry, ordered by key.
pub type EntryMeta = BTreeMap<String, String>;

pub const META_TICKET: &str = "ticket_number";
pub const META_BILLABLE: &str = "billable";

static TICKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d{4,6})(?:[^0-9]|$)+|.*#(\d{4,6})(?:[^0-9]|$)+)").expect("ticket pattern")
});

/// One clock-in/clock-out period ⇔ a row of `entry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: i64,
    pub sheet: String,
    pub start_time: i64,
    /// `None` while the entry is running.
    pub end_time: Option<i64>,
    pub description: Option<String>,
    #[serde(skip)]
    pub extra: Option<Vec<u8>>,
}

impl Entry {
    pub const COLUMNS: &'static str = "id, sheet, start_time, end_time, description, extra";

    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            sheet: row.get("sheet")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            description: row.get("description")?,
            extra: row.get("extra")?,
        })
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn end_or(&self, now: i64) -> i64 {
        self.end_time.unwrap_or(now)
    }

    /// Running entries count up to `now`.
    pub fn duration(&self, now: i64) -> i64 {
        self.end_or(now) - self.start_time
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Ticket number from the metadata, falling back to a number written at the
/// start of the description (`12345 fix login`) or after a `#`.
pub fn ticket_number(meta: &EntryMeta, description: Option<&str>) -> Option<String> {
    if let Some(t) = meta.get(META_TICKET).filter(|t| !t.is_empty()) {
        return Some(t.clone());
    }
    let caps = TICKET_RE.captures(description?)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Entries are billable unless flagged otherwise.
pub fn is_billable(meta: &EntryMeta) -> bool {
    meta.get(META_BILLABLE)
        .map(|v| !matches!(v.to_lowercase().as_str(), "no" | "false" | "0"))
        .unwrap_or(true)
}
