use crate::core::clock::{ClockIn, ClockLogic};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Entry, EntryMeta};
use crate::utils::time::{format_ts, parse_date_time, parse_offset};
use rusqlite::Connection;

/// What a backdate will do, computed before anything is written.
#[derive(Debug, Clone)]
pub struct BackdatePlan {
    pub sheet: String,
    pub target: i64,
    /// Entry whose end moves back to `target` (running or closed).
    pub adjust: Option<Entry>,
}

pub struct BackdateLogic;

impl BackdateLogic {
    /// `1h 20m ago`-style offsets count back from `now`; anything else is
    /// an absolute time.
    pub fn target(arg: &str, now: i64) -> AppResult<i64> {
        let target = match parse_offset(arg) {
            Some(secs) => now - secs,
            None => parse_date_time(arg, now)?,
        };
        if target > now {
            return Err(AppError::Usage(format!(
                "cannot backdate to {}: it is in the future",
                format_ts(target, "%Y-%m-%d %H:%M:%S")
            )));
        }
        Ok(target)
    }

    /// `target` is never after "now", so a running entry always crosses it.
    pub fn plan(conn: &Connection, target: i64) -> AppResult<BackdatePlan> {
        let sheet = queries::get_current_sheet(conn)?;
        let mut crossing = queries::entries_ending_after(conn, &sheet, target)?;

        let adjust = match crossing.len() {
            0 => None,
            1 => {
                let entry = crossing.remove(0);
                if entry.start_time >= target {
                    return Err(AppError::Overlap(format!(
                        "entry #{} starts at {}",
                        entry.id,
                        format_ts(entry.start_time, "%Y-%m-%d %H:%M:%S")
                    )));
                }
                Some(entry)
            }
            n => {
                return Err(AppError::Overlap(format!(
                    "{} entries end after {}",
                    n,
                    format_ts(target, "%Y-%m-%d %H:%M:%S")
                )));
            }
        };

        Ok(BackdatePlan {
            sheet,
            target,
            adjust,
        })
    }

    /// Truncate the crossing entry (if any) and clock in at the target.
    pub fn apply(
        conn: &Connection,
        plan: &BackdatePlan,
        notes: Option<String>,
        meta: EntryMeta,
    ) -> AppResult<i64> {
        if let Some(entry) = &plan.adjust {
            queries::close_entry(conn, entry.id, plan.target)?;
            log::info!(
                "entry #{} end moved to {}",
                entry.id,
                format_ts(plan.target, "%Y-%m-%d %H:%M:%S")
            );
        }

        ClockLogic::clock_in(
            conn,
            ClockIn {
                at: plan.target,
                notes,
                meta,
                ..ClockIn::default()
            },
        )
    }
}
