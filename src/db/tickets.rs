//! Local cache of ticket descriptions (`ticket_details`).

use crate::db::models::TicketDetails;
use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, params};

pub fn get_ticket_details(conn: &Connection, number: i64) -> AppResult<Option<TicketDetails>> {
    let details = conn
        .query_row(
            "SELECT number, IFNULL(project, ''), IFNULL(details, '')
             FROM ticket_details
             WHERE number = ?1
             LIMIT 1",
            params![number],
            |row| {
                Ok(TicketDetails {
                    number: row.get(0)?,
                    project: row.get(1)?,
                    details: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(details)
}

/// Replaces any cached row for the same ticket.
pub fn store_ticket_details(conn: &Connection, details: &TicketDetails) -> AppResult<()> {
    conn.execute(
        "DELETE FROM ticket_details WHERE number = ?1",
        params![details.number],
    )?;
    conn.execute(
        "INSERT INTO ticket_details (number, project, details) VALUES (?1, ?2, ?3)",
        params![details.number, details.project, details.details],
    )?;
    Ok(())
}
