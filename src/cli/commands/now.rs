use crate::cli::parser::{NowArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::sheet::SheetLogic;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::utils::time::timedelta;

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: NowArgs = parse_args("now", args)?;

    if a.simple {
        writeln!(ctx.out, "{}", queries::get_current_sheet(ctx.conn)?)?;
        return Ok(None);
    }

    let sheet = match &a.sheet {
        Some(token) => SheetLogic::complete_sheet(ctx.conn, token)?,
        None => queries::get_current_sheet(ctx.conn)?,
    };

    if queries::get_entry_count(ctx.conn, &sheet)? == 0 {
        return Err(AppError::EmptySheet(sheet));
    }

    let mut notes = String::new();
    let status = match queries::get_active_info(ctx.conn, &sheet, ctx.now)? {
        None => "not active".to_string(),
        Some(active) => {
            let duration = timedelta(active.elapsed);
            match active.description.as_deref().filter(|d| !d.is_empty()) {
                Some(d) => {
                    notes = d.trim_end_matches('.').to_string();
                    format!("{} ({})", duration, notes)
                }
                None => duration,
            }
        }
    };

    if a.notes {
        writeln!(ctx.out, "{}", notes)?;
    } else {
        writeln!(ctx.out, "{}: {}", sheet, status)?;
    }
    Ok(None)
}
