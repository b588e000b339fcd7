//! Best-effort activity reporting to a remote HTTP endpoint.

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::time::Duration;

/// Body POSTed after a successful state-changing command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityReport {
    pub user: String,
    pub command: String,
    /// Current sheet after the command.
    pub current: String,
    /// Start of the current sheet's running entry.
    pub since: Option<i64>,
    pub args: Vec<String>,
}

pub trait ReportingSink {
    fn report(&self, report: &ActivityReport) -> AppResult<()>;
}

pub struct HttpReportingSink {
    agent: ureq::Agent,
    url: String,
}

impl HttpReportingSink {
    pub fn new(url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self {
            agent,
            url: url.to_string(),
        }
    }
}

impl ReportingSink for HttpReportingSink {
    fn report(&self, report: &ActivityReport) -> AppResult<()> {
        self.agent
            .post(&self.url)
            .send_json(report)
            .map_err(|e| AppError::Reporting(format!("{}: {}", self.url, e)))?;
        log::debug!("reported '{}' to {}", report.command, self.url);
        Ok(())
    }
}

/// Reporting user: `user` from the configuration, else `$USER`.
pub fn reporting_user(configured: Option<&str>) -> String {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "unknown".to_string())
}
