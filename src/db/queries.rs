use crate::db::filter::EntryFilter;
use crate::db::models::{ActiveInfo, ClosedEntry, CurrentActive, CurrentStart, SheetSummary};
use crate::errors::{AppError, AppResult};
use crate::models::{DateException, Entry, EntryMeta};
use chrono::{Datelike, NaiveDate};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

// ---------------------------
// Sheet pointer
// ---------------------------

pub fn get_current_sheet(conn: &Connection) -> AppResult<String> {
    conn.query_row(
        "SELECT value FROM meta WHERE key = 'current_sheet'",
        [],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| AppError::Migration("current_sheet pointer is missing".into()))
}

pub fn set_current_sheet(conn: &Connection, sheet: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO meta (key, value) VALUES ('current_sheet', ?1)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![sheet],
    )?;
    Ok(())
}

/// Distinct sheets holding at least one entry, sorted.
pub fn get_sheet_names(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT sheet FROM entry ORDER BY sheet ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Active entries
// ---------------------------

pub fn get_active_info(conn: &Connection, sheet: &str, now: i64) -> AppResult<Option<ActiveInfo>> {
    let info = conn
        .query_row(
            "SELECT id, ?1 - start_time, description
             FROM entry
             WHERE sheet = ?2 AND end_time IS NULL
             ORDER BY start_time DESC, id DESC
             LIMIT 1",
            params![now, sheet],
            |row| {
                Ok(ActiveInfo {
                    entry_id: row.get(0)?,
                    elapsed: row.get(1)?,
                    description: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(info)
}

pub fn get_current_active_info(conn: &Connection, now: i64) -> AppResult<Option<CurrentActive>> {
    let info = conn
        .query_row(
            "SELECT e.id, ?1 - e.start_time
             FROM entry e
             INNER JOIN meta m ON m.key = 'current_sheet' AND m.value = e.sheet
             WHERE e.end_time IS NULL
             ORDER BY e.start_time DESC, e.id DESC
             LIMIT 1",
            params![now],
            |row| {
                Ok(CurrentActive {
                    entry_id: row.get(0)?,
                    elapsed: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(info)
}

pub fn get_current_start_time(conn: &Connection) -> AppResult<Option<CurrentStart>> {
    let info = conn
        .query_row(
            "SELECT e.id, e.start_time
             FROM entry e
             INNER JOIN meta m ON m.key = 'current_sheet' AND m.value = e.sheet
             WHERE e.end_time IS NULL
             ORDER BY e.start_time DESC, e.id DESC
             LIMIT 1",
            [],
            |row| {
                Ok(CurrentStart {
                    entry_id: row.get(0)?,
                    start_time: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(info)
}

/// Running entries of every sheet.
pub fn get_active_entries(conn: &Connection) -> AppResult<Vec<Entry>> {
    list_entries(conn, &EntryFilter::new().active())
}

pub fn get_entry_count(conn: &Connection, sheet: &str) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM entry WHERE sheet = ?1",
        params![sheet],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Latest closed entry of `sheet` (highest end time, then highest id).
pub fn get_most_recent_clockout(conn: &Connection, sheet: &str) -> AppResult<Option<ClosedEntry>> {
    let row = conn
        .query_row(
            "SELECT id, start_time, end_time, description
             FROM entry
             WHERE sheet = ?1 AND end_time IS NOT NULL
             ORDER BY end_time DESC, id DESC
             LIMIT 1",
            params![sheet],
            |row| {
                Ok(ClosedEntry {
                    entry_id: row.get(0)?,
                    start_time: row.get(1)?,
                    end_time: row.get(2)?,
                    description: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

// ---------------------------
// Entry CRUD
// ---------------------------

pub fn insert_entry(
    conn: &Connection,
    sheet: &str,
    start_time: i64,
    end_time: Option<i64>,
    description: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entry (sheet, start_time, end_time, description, extra)
         VALUES (?1, ?2, ?3, ?4, NULL)",
        params![sheet, start_time, end_time, description],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn close_entry(conn: &Connection, entry_id: i64, end_time: i64) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE entry SET end_time = ?1 WHERE id = ?2",
        params![end_time, entry_id],
    )?;
    if n == 0 {
        return Err(AppError::EntryNotFound(entry_id));
    }
    Ok(())
}

pub fn get_entry(conn: &Connection, entry_id: i64) -> AppResult<Option<Entry>> {
    let sql = format!("SELECT {} FROM entry WHERE id = ?1", Entry::COLUMNS);
    let entry = conn
        .query_row(&sql, params![entry_id], Entry::from_row)
        .optional()?;
    Ok(entry)
}

/// Rewrites timestamps and description; `sheet` and `extra` are kept.
pub fn update_entry(conn: &Connection, entry: &Entry) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE entry
         SET start_time = ?1, end_time = ?2, description = ?3
         WHERE id = ?4",
        params![
            entry.start_time,
            entry.end_time,
            entry.description,
            entry.id
        ],
    )?;
    if n == 0 {
        return Err(AppError::EntryNotFound(entry.id));
    }
    Ok(())
}

pub fn set_description(conn: &Connection, entry_id: i64, description: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE entry SET description = ?1 WHERE id = ?2",
        params![description, entry_id],
    )?;
    Ok(())
}

/// Removes every entry of `sheet` together with its metadata.
pub fn delete_sheet_entries(conn: &Connection, sheet: &str) -> AppResult<usize> {
    conn.execute(
        "DELETE FROM entry_meta
         WHERE entry_id IN (SELECT id FROM entry WHERE sheet = ?1)",
        params![sheet],
    )?;
    let n = conn.execute("DELETE FROM entry WHERE sheet = ?1", params![sheet])?;
    Ok(n)
}

// ---------------------------
// Filtered listings
// ---------------------------

pub fn list_entries(conn: &Connection, filter: &EntryFilter) -> AppResult<Vec<Entry>> {
    let sql = format!(
        "SELECT e.id, e.sheet, e.start_time, e.end_time, e.description, e.extra
         FROM entry e{}
         ORDER BY e.start_time ASC, e.id ASC",
        filter.where_sql()
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(filter.params().iter()), Entry::from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every entry in the store.
pub fn get_entry_rows(conn: &Connection) -> AppResult<Vec<Entry>> {
    list_entries(conn, &EntryFilter::new())
}

/// Sum of `coalesce(end_time, now) - start_time` over the filtered entries.
pub fn sum_durations(conn: &Connection, filter: &EntryFilter, now: i64) -> AppResult<i64> {
    let sql = format!(
        "SELECT IFNULL(SUM(IFNULL(e.end_time, ?) - e.start_time), 0)
         FROM entry e{}",
        filter.where_sql()
    );

    let params = std::iter::once(Value::Integer(now)).chain(filter.params().iter().cloned());
    let total = conn.query_row(&sql, params_from_iter(params), |row| row.get(0))?;
    Ok(total)
}

/// Entries of `sheet` whose span touches `[start, end)`; running entries
/// are open-ended. `exclude` skips the entry being edited.
pub fn find_overlapping(
    conn: &Connection,
    sheet: &str,
    start: i64,
    end: i64,
    exclude: Option<i64>,
) -> AppResult<Vec<Entry>> {
    let mut stmt = conn.prepare(
        "SELECT id, sheet, start_time, end_time, description, extra
         FROM entry
         WHERE sheet = ?1
           AND start_time < ?3
           AND (end_time IS NULL OR end_time > ?2)
           AND id != IFNULL(?4, -1)
         ORDER BY start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![sheet, start, end, exclude], Entry::from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries of `sheet` still running or ending after `ts`.
pub fn entries_ending_after(conn: &Connection, sheet: &str, ts: i64) -> AppResult<Vec<Entry>> {
    let mut stmt = conn.prepare(
        "SELECT id, sheet, start_time, end_time, description, extra
         FROM entry
         WHERE sheet = ?1 AND (end_time IS NULL OR end_time > ?2)
         ORDER BY start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![sheet, ts], Entry::from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Per-sheet figures for `list`. `today_start` is local midnight.
pub fn sheet_summaries(conn: &Connection, now: i64, today_start: i64) -> AppResult<Vec<SheetSummary>> {
    let mut stmt = conn.prepare(
        "SELECT
            e1.sheet,
            e1.sheet = m.value,
            IFNULL((SELECT ?1 - e2.start_time
                    FROM entry e2
                    WHERE e2.sheet = e1.sheet AND e2.end_time IS NULL
                    ORDER BY e2.start_time DESC
                    LIMIT 1), 0),
            (SELECT IFNULL(SUM(IFNULL(e3.end_time, ?1) - e3.start_time), 0)
             FROM entry e3
             WHERE e3.sheet = e1.sheet AND e3.start_time > ?2),
            IFNULL(SUM(IFNULL(e1.end_time, ?1) - e1.start_time), 0)
         FROM entry e1
         INNER JOIN meta m ON m.key = 'current_sheet'
         GROUP BY e1.sheet
         ORDER BY e1.sheet ASC",
    )?;

    let rows = stmt.query_map(params![now, today_start], |row| {
        Ok(SheetSummary {
            sheet: row.get(0)?,
            is_current: row.get(1)?,
            running: row.get(2)?,
            today: row.get(3)?,
            total: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Entry metadata
// ---------------------------

pub fn get_entry_meta(conn: &Connection, entry_id: i64) -> AppResult<EntryMeta> {
    let mut stmt = conn.prepare(
        "SELECT key, value FROM entry_meta
         WHERE entry_id = ?1
         ORDER BY key ASC",
    )?;
    let rows = stmt.query_map(params![entry_id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut meta = EntryMeta::new();
    for r in rows {
        let (k, v) = r?;
        meta.insert(k, v);
    }
    Ok(meta)
}

/// Additive merge: supplied keys are inserted or updated, others are kept.
pub fn update_entry_meta(conn: &Connection, entry_id: i64, meta: &EntryMeta) -> AppResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO entry_meta (entry_id, key, value) VALUES (?1, ?2, ?3)
         ON CONFLICT(entry_id, key) DO UPDATE SET value = excluded.value
         WHERE entry_meta.value != excluded.value",
    )?;
    for (key, value) in meta {
        stmt.execute(params![entry_id, key, value])?;
    }
    Ok(())
}

// ---------------------------
// Calendar exceptions
// ---------------------------

/// First table (holiday, unpaid, vacation) listing `date`. Rows with a
/// NULL year recur every year.
pub fn is_date_exception(conn: &Connection, date: NaiveDate) -> AppResult<DateException> {
    for (kind, table) in DateException::TABLES {
        // `table` comes from a fixed list, never from input.
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE (year = ?1 OR year IS NULL) AND month = ?2 AND day = ?3",
            table
        );
        let n: i64 = conn.query_row(
            &sql,
            params![date.year(), date.month(), date.day()],
            |row| row.get(0),
        )?;
        if n > 0 {
            return Ok(kind);
        }
    }
    Ok(DateException::None)
}
