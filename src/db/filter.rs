//! Composable WHERE clause for entry queries.
//!
//! Predicates are static SQL fragments with anonymous `?` placeholders;
//! their values travel separately and are bound by position.

use rusqlite::types::Value;

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    clauses: Vec<&'static str>,
    params: Vec<Value>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, clause: &'static str, value: Option<Value>) -> Self {
        self.clauses.push(clause);
        if let Some(v) = value {
            self.params.push(v);
        }
        self
    }

    pub fn sheet(self, sheet: &str) -> Self {
        self.push("e.sheet = ?", Some(Value::Text(sheet.to_string())))
    }

    pub fn started_at_or_after(self, ts: i64) -> Self {
        self.push("e.start_time >= ?", Some(Value::Integer(ts)))
    }

    pub fn started_before(self, ts: i64) -> Self {
        self.push("e.start_time < ?", Some(Value::Integer(ts)))
    }

    pub fn ended_at_or_before(self, ts: i64) -> Self {
        self.push("e.end_time <= ?", Some(Value::Integer(ts)))
    }

    pub fn closed(self) -> Self {
        self.push("e.end_time IS NOT NULL", None)
    }

    pub fn active(self) -> Self {
        self.push("e.end_time IS NULL", None)
    }

    /// ` WHERE a AND b ...`, or an empty string when unfiltered.
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}
