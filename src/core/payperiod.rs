//! Accounting windows. Each policy is a pure function of "now" (local
//! wall-clock time); boundaries fall on local midnight.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

pub const HOURS_PER_DAY: f64 = 8.0;

pub trait PayPeriodPolicy {
    fn name(&self) -> &'static str;
    fn begin_period(&self, now: NaiveDateTime) -> NaiveDateTime;
    fn end_period(&self, now: NaiveDateTime) -> NaiveDateTime;

    fn hours_per_day(&self) -> f64 {
        HOURS_PER_DAY
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// `[now - N days, tomorrow)`.
pub struct RollingWindow {
    name: &'static str,
    days: i64,
}

impl PayPeriodPolicy for RollingWindow {
    fn name(&self) -> &'static str {
        self.name
    }

    fn begin_period(&self, now: NaiveDateTime) -> NaiveDateTime {
        midnight(now.date() - Duration::days(self.days))
    }

    fn end_period(&self, now: NaiveDateTime) -> NaiveDateTime {
        midnight(now.date() + Duration::days(1))
    }
}

/// Periods close on the second-to-last Friday of each month.
pub struct MonthlyOnSecondToLastFriday;

/// Second-to-last Friday on or before the last day of the month.
pub fn second_to_last_friday(year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    let back = (last.weekday().num_days_from_monday() + 7
        - Weekday::Fri.num_days_from_monday())
        % 7;
    Some(last - Duration::days(i64::from(back) + 7))
}

impl MonthlyOnSecondToLastFriday {
    fn day_after_cutoff(date: NaiveDate) -> NaiveDateTime {
        let cutoff = second_to_last_friday(date.year(), date.month()).unwrap_or(date);
        midnight(cutoff + Duration::days(1))
    }
}

impl PayPeriodPolicy for MonthlyOnSecondToLastFriday {
    fn name(&self) -> &'static str {
        "MonthlyOnSecondToLastFriday"
    }

    fn begin_period(&self, now: NaiveDateTime) -> NaiveDateTime {
        let prev = now
            .date()
            .with_day(1)
            .and_then(|d| d.checked_sub_months(Months::new(1)))
            .unwrap_or(now.date());
        Self::day_after_cutoff(prev)
    }

    fn end_period(&self, now: NaiveDateTime) -> NaiveDateTime {
        Self::day_after_cutoff(now.date())
    }
}

pub struct TodayOnly;

impl PayPeriodPolicy for TodayOnly {
    fn name(&self) -> &'static str {
        "TodayOnly"
    }

    fn begin_period(&self, now: NaiveDateTime) -> NaiveDateTime {
        midnight(now.date())
    }

    fn end_period(&self, now: NaiveDateTime) -> NaiveDateTime {
        midnight(now.date() + Duration::days(1))
    }
}

pub const POLICY_NAMES: [&str; 6] = [
    "Rolling7DayWindow",
    "Rolling30DayWindow",
    "Rolling90DayWindow",
    "RollingAnnualWindow",
    "MonthlyOnSecondToLastFriday",
    "TodayOnly",
];

pub fn policy_for(name: &str) -> AppResult<Box<dyn PayPeriodPolicy>> {
    let rolling = |name: &'static str, days: i64| -> Box<dyn PayPeriodPolicy> {
        Box::new(RollingWindow { name, days })
    };

    match name {
        "Rolling7DayWindow" => Ok(rolling("Rolling7DayWindow", 7)),
        "Rolling30DayWindow" => Ok(rolling("Rolling30DayWindow", 30)),
        "Rolling90DayWindow" => Ok(rolling("Rolling90DayWindow", 90)),
        "RollingAnnualWindow" => Ok(rolling("RollingAnnualWindow", 365)),
        "MonthlyOnSecondToLastFriday" => Ok(Box::new(MonthlyOnSecondToLastFriday)),
        "TodayOnly" => Ok(Box::new(TodayOnly)),
        other => Err(AppError::Config(format!(
            "unknown payperiod_type '{}' (expected one of: {})",
            other,
            POLICY_NAMES.join(", ")
        ))),
    }
}
