use crate::core::clock::check_no_overlap;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use crate::utils::time::{local_datetime, local_to_timestamp};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const TIME_FMT: &str = "%H:%M:%S";

/// Raw answers to the `modify` prompts; an empty answer keeps the value.
#[derive(Debug, Clone, Default)]
pub struct ModifyAnswers {
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub description: String,
}

pub struct ModifyLogic;

impl ModifyLogic {
    pub fn load(conn: &Connection, id: i64) -> AppResult<Entry> {
        queries::get_entry(conn, id)?.ok_or(AppError::EntryNotFound(id))
    }

    /// Current values shown as prompt defaults: start date, start time,
    /// end date, end time (empty while running).
    pub fn defaults(entry: &Entry) -> [String; 4] {
        let start = local_datetime(entry.start_time);
        let (end_date, end_time) = match entry.end_time {
            Some(end) => {
                let end = local_datetime(end);
                (
                    end.format(DATE_FMT).to_string(),
                    end.format(TIME_FMT).to_string(),
                )
            }
            None => (String::new(), String::new()),
        };
        [
            start.format(DATE_FMT).to_string(),
            start.format(TIME_FMT).to_string(),
            end_date,
            end_time,
        ]
    }

    /// Merge the answers over the entry's current values.
    pub fn resolve(entry: &Entry, answers: &ModifyAnswers) -> AppResult<Entry> {
        let [start_date, start_time, end_date, end_time] = Self::defaults(entry);

        let start_date = parse_date(pick(&answers.start_date, &start_date))?;
        let start_time = parse_time(pick(&answers.start_time, &start_time))?;
        let start = local_to_timestamp(start_date.and_time(start_time))?;

        let end_date_raw = pick(&answers.end_date, &end_date);
        let end_time_raw = pick(&answers.end_time, &end_time);

        // a running entry stays running unless an end is given
        let end = if end_date_raw.is_empty() && end_time_raw.is_empty() {
            None
        } else {
            let date = if end_date_raw.is_empty() {
                start_date
            } else {
                parse_date(end_date_raw)?
            };
            let time = if end_time_raw.is_empty() {
                NaiveTime::MIN
            } else {
                parse_time(end_time_raw)?
            };
            Some(local_to_timestamp(date.and_time(time))?)
        };

        let description = match answers.description.trim() {
            "" => entry.description.clone(),
            d => Some(d.to_string()),
        };

        Ok(Entry {
            start_time: start,
            end_time: end,
            description,
            ..entry.clone()
        })
    }

    /// Validate and persist an edited entry.
    pub fn apply(conn: &Connection, edited: &Entry) -> AppResult<()> {
        if let Some(end) = edited.end_time
            && end < edited.start_time
        {
            return Err(AppError::NegativeDuration {
                start: edited.start_time,
                end,
            });
        }

        check_no_overlap(
            conn,
            &edited.sheet,
            edited.start_time,
            edited.end_time.unwrap_or(i64::MAX),
            Some(edited.id),
        )?;

        queries::update_entry(conn, edited)?;
        log::info!("entry #{} modified", edited.id);
        Ok(())
    }
}

fn pick<'a>(answer: &'a str, current: &'a str) -> &'a str {
    match answer.trim() {
        "" => current,
        a => a,
    }
}

fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|_| AppError::InvalidDate(s.to_string()))
}

fn parse_time(s: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FMT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}
