//! Posts one day of the default sheet to the web timesheet.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use std::time::Duration;

const DEFAULT_TIMESHEET_URL: &str = "http://www.parthenonsoftware.com/timesheet/timesheet.php";
const DEFAULT_LOGIN_URL: &str = "http://www.parthenonsoftware.com/timesheet/index.php";

/// One line of the web timesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub start_hour: String,
    pub start_min: String,
    pub end_hour: String,
    pub end_min: String,
    pub ticket: Option<String>,
    pub description: String,
    pub billable: bool,
}

/// Form fields in the order the timesheet expects them.
pub fn form_fields(date: NaiveDate, entries: &[PostEntry]) -> Vec<(String, String)> {
    let mut data = vec![
        ("__tcAction[saveTimesheet]".to_string(), "save".to_string()),
        ("date".to_string(), date.format("%Y-%m-%d").to_string()),
    ];

    for e in entries {
        data.push(("starthour[]".into(), e.start_hour.clone()));
        data.push(("startmin[]".into(), e.start_min.clone()));
        data.push(("endhour[]".into(), e.end_hour.clone()));
        data.push(("endmin[]".into(), e.end_min.clone()));
        data.push(("mantisid[]".into(), e.ticket.clone().unwrap_or_default()));
        data.push(("description[]".into(), e.description.clone()));
        data.push((
            "debug[]".into(),
            if e.billable { "0" } else { "1" }.to_string(),
        ));
    }
    data
}

pub struct TimesheetPoster {
    agent: ureq::Agent,
    pub login_url: String,
    pub timesheet_url: String,
}

impl TimesheetPoster {
    pub fn from_config(cfg: &Config) -> Self {
        // session cookie from the login is reused for the post
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        Self {
            agent,
            login_url: cfg.get_or("timesheet_poster", "login_url", DEFAULT_LOGIN_URL),
            timesheet_url: cfg.get_or("timesheet_poster", "timesheet_url", DEFAULT_TIMESHEET_URL),
        }
    }

    pub fn login(&self, username: &str, password: &str) -> AppResult<()> {
        self.agent
            .post(&self.login_url)
            .send_form(&[("username", username), ("password", password)])?;
        Ok(())
    }

    pub fn post(&self, date: NaiveDate, fields: &[(String, String)]) -> AppResult<u16> {
        let url = format!("{}?date={}", self.timesheet_url, date.format("%Y-%m-%d"));
        let form: Vec<(&str, &str)> = fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let resp = self.agent.post(&url).send_form(&form)?;
        let status = resp.status();
        if status >= 400 {
            return Err(AppError::Http(format!("{} answered {}", url, status)));
        }
        Ok(status)
    }
}
