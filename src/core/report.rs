//! Read-side aggregation shared by `display`, `stats` and `post`.
//! Running entries count up to `now`.

use crate::db::EntryFilter;
use crate::db::queries;
use crate::errors::AppResult;
use crate::integrations::TicketLookup;
use crate::models::entry::{is_billable, ticket_number};
use crate::models::{Entry, EntryMeta};
use crate::utils::time::local_date;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;

pub const NO_PROJECT: &str = "(no project)";
pub const NO_TICKET: &str = "(no ticket)";

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub entry: Entry,
    pub meta: EntryMeta,
    pub ticket: Option<String>,
    /// Description enriched with the ticket's `Project: subject`.
    pub notes: String,
    pub billable: bool,
    pub duration: i64,
}

/// Entries of one local calendar day.
#[derive(Debug, Clone)]
pub struct DayGroup<'a> {
    pub day: NaiveDate,
    pub entries: Vec<&'a ReportEntry>,
    pub total: i64,
}

/// Hours per sheet, project and ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub by_sheet: BTreeMap<String, i64>,
    pub by_project: BTreeMap<String, i64>,
    pub by_ticket: BTreeMap<String, i64>,
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn entries(
        conn: &Connection,
        filter: &EntryFilter,
        lookup: &dyn TicketLookup,
        now: i64,
    ) -> AppResult<Vec<ReportEntry>> {
        let rows = queries::list_entries(conn, filter)?;
        let mut out = Vec::with_capacity(rows.len());

        for entry in rows {
            let meta = queries::get_entry_meta(conn, entry.id)?;
            let ticket = ticket_number(&meta, entry.description.as_deref());

            let mut notes = entry.description_or_empty().to_string();
            if let Some(t) = &ticket
                && let Some(detail) = lookup.description_for_ticket(conn, t)
            {
                notes = if notes.is_empty() {
                    format!("{} ({})", t, detail)
                } else {
                    format!("{} ({})", notes, detail)
                };
            }

            out.push(ReportEntry {
                billable: is_billable(&meta),
                duration: entry.duration(now),
                entry,
                meta,
                ticket,
                notes,
            });
        }
        Ok(out)
    }

    /// Group consecutive entries by the local day they start on.
    pub fn by_day(entries: &[ReportEntry]) -> Vec<DayGroup<'_>> {
        let mut groups: Vec<DayGroup<'_>> = Vec::new();

        for e in entries {
            let day = local_date(e.entry.start_time);
            match groups.last_mut() {
                Some(g) if g.day == day => {
                    g.entries.push(e);
                    g.total += e.duration;
                }
                _ => groups.push(DayGroup {
                    day,
                    entries: vec![e],
                    total: e.duration,
                }),
            }
        }
        groups
    }

    pub fn stats(
        conn: &Connection,
        filter: &EntryFilter,
        lookup: &dyn TicketLookup,
        now: i64,
    ) -> AppResult<Stats> {
        let mut stats = Stats::default();

        for e in Self::entries(conn, filter, lookup, now)? {
            *stats.by_sheet.entry(e.entry.sheet.clone()).or_default() += e.duration;

            let (project, ticket) = match &e.ticket {
                Some(t) => {
                    let project = lookup
                        .details_for_ticket(conn, t)
                        .map(|d| d.project)
                        .unwrap_or_else(|| NO_PROJECT.to_string());
                    (project, t.clone())
                }
                None => (NO_PROJECT.to_string(), NO_TICKET.to_string()),
            };
            *stats.by_project.entry(project).or_default() += e.duration;
            *stats.by_ticket.entry(ticket).or_default() += e.duration;
        }

        Ok(stats)
    }
}
