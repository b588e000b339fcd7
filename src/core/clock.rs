use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Entry, EntryMeta};
use crate::utils::time::format_ts;
use rusqlite::Connection;

const TS_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Parameters of a clock-in.
#[derive(Debug, Clone, Default)]
pub struct ClockIn {
    /// Sheet to switch to before starting.
    pub switch: Option<String>,
    pub at: i64,
    /// Close the running entry of the target sheet (after any switch) first.
    pub out: bool,
    /// Carry description and metadata over from the last closed entry.
    pub resume: bool,
    pub notes: Option<String>,
    pub meta: EntryMeta,
}

/// A closed period: entry id and its final duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedPeriod {
    pub entry_id: i64,
    pub duration: i64,
}

/// State transitions of time entries (Absent → Active → Closed).
pub struct ClockLogic;

impl ClockLogic {
    /// Start a new period; returns the new entry id.
    pub fn clock_in(conn: &Connection, req: ClockIn) -> AppResult<i64> {
        // 1) switch
        if let Some(target) = &req.switch {
            crate::core::sheet::SheetLogic::switch(conn, target)?;
        }

        // 2) --out closes the running entry of the sheet we are clocking into
        if req.out {
            match Self::clock_out(conn, req.at) {
                Ok(p) => log::debug!("closed entry #{} before clocking in", p.entry_id),
                Err(AppError::NotActive(_)) => {}
                Err(e) => return Err(e),
            }
        }
        let sheet = queries::get_current_sheet(conn)?;

        // 3) one running entry per sheet
        if queries::get_active_info(conn, &sheet, req.at)?.is_some() {
            return Err(AppError::AlreadyActive(sheet));
        }

        // 4) never start before the last clock-out
        let mut description = req.notes.clone();
        let mut meta = EntryMeta::new();

        if let Some(prev) = queries::get_most_recent_clockout(conn, &sheet)? {
            if req.at < prev.end_time {
                return Err(AppError::Overlap(format!(
                    "entry #{} ends at {}",
                    prev.entry_id,
                    format_ts(prev.end_time, TS_FMT)
                )));
            }

            if req.resume {
                meta = queries::get_entry_meta(conn, prev.entry_id)?;
                if description.is_none() {
                    description = prev.description.clone();
                }
            }
        }

        // 5) insert entry + metadata
        meta.extend(req.meta);
        let id = queries::insert_entry(conn, &sheet, req.at, None, description.as_deref())?;
        if !meta.is_empty() {
            queries::update_entry_meta(conn, id, &meta)?;
        }

        log::info!("clocked in on '{}' as entry #{}", sheet, id);
        Ok(id)
    }

    /// Close the running entry of the current sheet at `at`.
    pub fn clock_out(conn: &Connection, at: i64) -> AppResult<ClosedPeriod> {
        let Some(active) = queries::get_current_start_time(conn)? else {
            return Err(AppError::NotActive(queries::get_current_sheet(conn)?));
        };

        if at < active.start_time {
            return Err(AppError::NegativeDuration {
                start: active.start_time,
                end: at,
            });
        }

        queries::close_entry(conn, active.entry_id, at)?;
        Ok(ClosedPeriod {
            entry_id: active.entry_id,
            duration: at - active.start_time,
        })
    }

    /// Close every running entry of every sheet. Nothing is written unless
    /// all of them can be closed at `at`.
    pub fn clock_out_all(conn: &Connection, at: i64) -> AppResult<Vec<ClosedPeriod>> {
        let active = queries::get_active_entries(conn)?;
        if active.is_empty() {
            return Err(AppError::NothingActive);
        }

        if let Some(bad) = active.iter().find(|e| at < e.start_time) {
            return Err(AppError::NegativeDuration {
                start: bad.start_time,
                end: at,
            });
        }

        let mut closed = Vec::with_capacity(active.len());
        for entry in active {
            queries::close_entry(conn, entry.id, at)?;
            closed.push(ClosedPeriod {
                entry_id: entry.id,
                duration: at - entry.start_time,
            });
        }
        Ok(closed)
    }

    /// Change description and/or metadata of the running entry of the
    /// current sheet, or of entry `id`. Timestamps are never touched.
    pub fn alter(
        conn: &Connection,
        id: Option<i64>,
        notes: Option<&str>,
        meta: &EntryMeta,
        now: i64,
    ) -> AppResult<i64> {
        let entry_id = match id {
            Some(id) => {
                queries::get_entry(conn, id)?.ok_or(AppError::EntryNotFound(id))?;
                id
            }
            None => match queries::get_current_active_info(conn, now)? {
                Some(active) => active.entry_id,
                None => return Err(AppError::NotActive(queries::get_current_sheet(conn)?)),
            },
        };

        if let Some(notes) = notes {
            queries::set_description(conn, entry_id, notes)?;
        }
        if !meta.is_empty() {
            queries::update_entry_meta(conn, entry_id, meta)?;
        }
        Ok(entry_id)
    }

    /// Add a closed entry to `sheet`; returns its id.
    pub fn insert(
        conn: &Connection,
        sheet: &str,
        start: i64,
        end: i64,
        description: Option<&str>,
    ) -> AppResult<i64> {
        if end < start {
            return Err(AppError::NegativeDuration { start, end });
        }

        check_no_overlap(conn, sheet, start, end, None)?;

        let id = queries::insert_entry(conn, sheet, start, Some(end), description)?;
        Ok(id)
    }
}

/// Fails with `Overlap` when `[start, end)` intersects another entry of the sheet.
pub fn check_no_overlap(
    conn: &Connection,
    sheet: &str,
    start: i64,
    end: i64,
    exclude: Option<i64>,
) -> AppResult<()> {
    let clashes: Vec<Entry> = queries::find_overlapping(conn, sheet, start, end, exclude)?;
    match clashes.as_slice() {
        [] => Ok(()),
        [one] => Err(AppError::Overlap(format!("entry #{}", one.id))),
        many => Err(AppError::Overlap(format!("{} entries", many.len()))),
    }
}
