use crate::cli::commands::{ask, is_yes};
use crate::cli::parser::{KillArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::sheet::SheetLogic;
use crate::db::queries;
use crate::errors::AppResult;

/// Delete a whole sheet after confirmation.
pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: KillArgs = parse_args("kill", args)?;

    let target = match &a.sheet {
        Some(s) => s.clone(),
        None => queries::get_current_sheet(ctx.conn)?,
    };

    let answer = ask(ctx.out, ctx.input, &format!("delete timesheet {}? ", target))?;
    if !is_yes(answer.as_deref()) {
        writeln!(ctx.out, "canceled")?;
        return Ok(None);
    }

    let (sheet, _) = SheetLogic::kill(ctx.conn, a.sheet.as_deref())?;
    Ok(Some(sheet))
}
