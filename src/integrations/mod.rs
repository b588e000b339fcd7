//! HTTP collaborators: activity reporting, ticket lookup, timesheet posting.

pub mod poster;
pub mod reporting;
pub mod ticket_lookup;

pub use reporting::{ActivityReport, HttpReportingSink, ReportingSink};
pub use ticket_lookup::{CachedTicketLookup, TicketLookup};
