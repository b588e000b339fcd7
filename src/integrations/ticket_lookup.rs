//! Ticket descriptions: local `ticket_details` cache with a remote
//! issue-tracker fallback.

use crate::config::Config;
use crate::db::models::TicketDetails;
use crate::db::tickets;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use serde_json::Value;
use std::time::Duration;

/// Remote source of ticket information.
pub trait TicketSource {
    fn fetch(&self, number: i64) -> AppResult<Option<TicketDetails>>;
}

/// What report rendering needs; lookups never fail, they just find nothing.
pub trait TicketLookup {
    fn details_for_ticket(&self, conn: &Connection, ticket: &str) -> Option<TicketDetails>;

    /// `Project: subject`
    fn description_for_ticket(&self, conn: &Connection, ticket: &str) -> Option<String> {
        self.details_for_ticket(conn, ticket)
            .map(|d| format!("{}: {}", d.project, d.details))
    }
}

/// ChiliProject / Redmine `issues/<n>.json` endpoint.
pub struct ChiliProjectSource {
    agent: ureq::Agent,
    domain: String,
    api_key: Option<String>,
}

impl ChiliProjectSource {
    pub fn new(domain: &str, api_key: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self {
            agent,
            domain: domain.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn issue_url(&self, number: i64) -> String {
        format!("http://{}/issues/{}.json", self.domain, number)
    }
}

impl TicketSource for ChiliProjectSource {
    fn fetch(&self, number: i64) -> AppResult<Option<TicketDetails>> {
        let mut req = self.agent.get(&self.issue_url(number));
        if let Some(key) = &self.api_key {
            req = req.set("X-Redmine-API-Key", key);
        }

        let body: Value = match req.call() {
            Ok(resp) => resp.into_json()?,
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(e) => return Err(AppError::from(e)),
        };

        let issue = &body["issue"];
        let (Some(project), Some(subject)) = (
            issue["project"]["name"].as_str(),
            issue["subject"].as_str(),
        ) else {
            return Ok(None);
        };

        Ok(Some(TicketDetails {
            number,
            project: project.to_string(),
            details: subject.to_string(),
        }))
    }
}

/// Cache first; on a miss ask the remote source (if any) and remember
/// the answer.
pub struct CachedTicketLookup {
    remote: Option<Box<dyn TicketSource>>,
}

impl CachedTicketLookup {
    pub fn new(remote: Option<Box<dyn TicketSource>>) -> Self {
        Self { remote }
    }

    /// Cache only.
    pub fn offline() -> Self {
        Self { remote: None }
    }

    /// A remote source is used when `chiliproject.domain` is configured.
    pub fn from_config(cfg: &Config) -> Self {
        if !cfg.has_option("chiliproject", "domain") {
            log::debug!("no ticket tracker configured, using the local cache only");
            return Self::offline();
        }
        let remote = cfg.get("chiliproject", "domain").map(|domain| {
            Box::new(ChiliProjectSource::new(
                &domain,
                cfg.get("chiliproject", "api_key"),
            )) as Box<dyn TicketSource>
        });
        Self { remote }
    }
}

impl TicketLookup for CachedTicketLookup {
    fn details_for_ticket(&self, conn: &Connection, ticket: &str) -> Option<TicketDetails> {
        let number: i64 = ticket.trim().parse().ok()?;

        match tickets::get_ticket_details(conn, number) {
            Ok(Some(d)) => return Some(d),
            Ok(None) => {}
            Err(e) => log::warn!("ticket cache unavailable: {}", e),
        }

        let remote = self.remote.as_ref()?;
        match remote.fetch(number) {
            Ok(Some(details)) => {
                if let Err(e) = tickets::store_ticket_details(conn, &details) {
                    log::warn!("cannot cache ticket {}: {}", number, e);
                }
                Some(details)
            }
            Ok(None) => None,
            Err(e) => {
                log::debug!("ticket {} lookup failed: {}", number, e);
                None
            }
        }
    }
}
