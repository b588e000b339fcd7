use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::utils::{Completion, complete};
use rusqlite::Connection;

pub const DEFAULT_SHEET: &str = "default";

pub struct SheetLogic;

impl SheetLogic {
    /// Repoint the current sheet. Returns false when it already was `sheet`
    /// (nothing is written then).
    pub fn switch(conn: &Connection, sheet: &str) -> AppResult<bool> {
        if queries::get_current_sheet(conn)? == sheet {
            return Ok(false);
        }
        queries::set_current_sheet(conn, sheet)?;
        log::debug!("current sheet is now '{}'", sheet);
        Ok(true)
    }

    /// Delete every entry of `sheet` (the current one when `None`).
    /// Killing the current sheet implicitly switches back to `default`.
    pub fn kill(conn: &Connection, sheet: Option<&str>) -> AppResult<(String, usize)> {
        let (target, switch_to_default) = match sheet {
            Some(s) => (s.to_string(), false),
            None => (queries::get_current_sheet(conn)?, true),
        };

        let deleted = queries::delete_sheet_entries(conn, &target)?;
        if switch_to_default {
            Self::switch(conn, DEFAULT_SHEET)?;
        }

        log::info!("deleted {} entries of '{}'", deleted, target);
        Ok((target, deleted))
    }

    /// Resolve a sheet name typed by the user against existing sheets.
    pub fn complete_sheet(conn: &Connection, token: &str) -> AppResult<String> {
        let names = queries::get_sheet_names(conn)?;
        match complete(names.iter().map(String::as_str), token) {
            Completion::Found(name) => Ok(name.to_string()),
            Completion::Ambiguous(candidates) => Err(AppError::AmbiguousSheet {
                token: token.to_string(),
                candidates,
            }),
            Completion::NoMatch => Err(AppError::UnknownSheet(token.to_string())),
        }
    }
}
