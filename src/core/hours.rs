use crate::core::payperiod::PayPeriodPolicy;
use crate::core::sheet::DEFAULT_SHEET;
use crate::db::EntryFilter;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::DateException;
use crate::utils::time::{hours, local_datetime, local_to_timestamp};
use chrono::{Datelike, Duration, NaiveTime, Weekday};
use rusqlite::Connection;
use serde::Serialize;

/// Expected-vs-actual figures of the pay period containing "now".
/// Hours are not rounded here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursDetails {
    pub expected: f64,
    pub actual: f64,
    pub vacation: f64,
    pub unpaid: f64,
    pub holiday: f64,
    pub balance: f64,
    /// Clock-out time that would meet the expected hours exactly.
    pub out_time: i64,
    pub begin_period: i64,
    pub end_period: i64,
}

pub struct HoursLogic;

impl HoursLogic {
    pub fn details(
        conn: &Connection,
        policy: &dyn PayPeriodPolicy,
        now: i64,
    ) -> AppResult<HoursDetails> {
        let local_now = local_datetime(now).naive_local();
        let begin = policy.begin_period(local_now);
        let end = policy.end_period(local_now);
        let begin_ts = local_to_timestamp(begin)?;
        let end_ts = local_to_timestamp(end)?;
        let per_day = policy.hours_per_day();

        // 1) weekdays in [begin, now), exceptions removed
        let mut expected = 0.0;
        let (mut vacation, mut unpaid, mut holiday) = (0.0, 0.0, 0.0);

        let mut day = begin.date();
        while local_to_timestamp(day.and_time(NaiveTime::MIN))? < now {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                expected += per_day;
                match queries::is_date_exception(conn, day)? {
                    DateException::None => {}
                    DateException::Holiday => {
                        expected -= per_day;
                        holiday += per_day;
                    }
                    DateException::Unpaid => {
                        expected -= per_day;
                        unpaid += per_day;
                    }
                    DateException::Vacation => {
                        expected -= per_day;
                        vacation += per_day;
                    }
                }
            }
            day += Duration::days(1);
        }

        // 2) worked hours on the default sheet
        let filter = EntryFilter::new()
            .sheet(DEFAULT_SHEET)
            .started_at_or_after(begin_ts)
            .started_before(end_ts);
        let actual = hours(queries::sum_durations(conn, &filter, now)?);

        let out_time = now + ((expected - actual) * 3600.0).round() as i64;

        Ok(HoursDetails {
            expected,
            actual,
            vacation,
            unpaid,
            holiday,
            balance: actual - expected,
            out_time,
            begin_period: begin_ts,
            end_period: end_ts,
        })
    }
}
