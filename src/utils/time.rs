//! Time utilities: parsing user supplied instants and offsets, converting
//! unix timestamps to local time, formatting durations.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

static OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+\s*[dhms]\s*)+(?:ago)?\s*$").expect("offset pattern")
});
static OFFSET_PART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*([dhms])").expect("offset part pattern"));

/// Local wall-clock time of a unix timestamp.
pub fn local_datetime(ts: i64) -> DateTime<Local> {
    DateTime::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&Local)
}

pub fn local_date(ts: i64) -> NaiveDate {
    local_datetime(ts).date_naive()
}

/// Unix timestamp of a local wall-clock time. On DST folds the earlier
/// instant wins; times skipped by DST are rejected.
pub fn local_to_timestamp(ndt: NaiveDateTime) -> AppResult<i64> {
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| AppError::InvalidDate(ndt.to_string()))
}

/// Local midnight starting the day that contains `ts`.
pub fn day_start(ts: i64) -> AppResult<i64> {
    local_to_timestamp(local_date(ts).and_time(NaiveTime::MIN))
}

/// Parse `HH:MM`, `HH:MM:SS` (today), `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or
/// `YYYY-MM-DD HH:MM:SS` as local time. "Today" is the day of `now`.
pub fn parse_date_time(input: &str, now: i64) -> AppResult<i64> {
    let s = input.trim();

    for fmt in ["%H:%M", "%H:%M:%S"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return local_to_timestamp(local_date(now).and_time(t));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return local_to_timestamp(d.and_time(NaiveTime::MIN));
    }

    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_to_timestamp(dt);
        }
    }

    Err(AppError::InvalidDate(input.to_string()))
}

pub fn parse_date_time_or_now(input: Option<&str>, now: i64) -> AppResult<i64> {
    match input {
        Some(s) if !s.trim().is_empty() => parse_date_time(s, now),
        _ => Ok(now),
    }
}

/// Parse a relative offset such as `1h 20m ago` or `90m` into seconds.
pub fn parse_offset(input: &str) -> Option<i64> {
    if !OFFSET_RE.is_match(input) {
        return None;
    }

    let mut total = 0i64;
    for cap in OFFSET_PART_RE.captures_iter(input) {
        let n: i64 = cap[1].parse().ok()?;
        let unit = match &cap[2] {
            "d" => 86_400,
            "h" => 3_600,
            "m" => 60,
            _ => 1,
        };
        total = total.checked_add(n.checked_mul(unit)?)?;
    }
    Some(total)
}

/// `HH:MM:SS`, hours are not wrapped at 24.
pub fn hms(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.abs();
    format!("{}{:02}:{:02}:{:02}", sign, s / 3600, (s / 60) % 60, s % 60)
}

/// `H:MM:SS`, or `N day(s), H:MM:SS` past 24 hours.
pub fn timedelta(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.abs();
    let days = s / 86_400;
    let rest = s % 86_400;
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest / 60) % 60, rest % 60);

    match days {
        0 => format!("{sign}{clock}"),
        1 => format!("{sign}1 day, {clock}"),
        n => format!("{sign}{n} days, {clock}"),
    }
}

pub fn format_ts(ts: i64, fmt: &str) -> String {
    local_datetime(ts).format(fmt).to_string()
}

pub fn hours(seconds: i64) -> f64 {
    seconds as f64 / 3600.0
}
