use crate::cli::parser::{SwitchArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::sheet::SheetLogic;
use crate::db::queries;
use crate::errors::AppResult;

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: SwitchArgs = parse_args("switch", args)?;

    SheetLogic::switch(ctx.conn, &a.sheet)?;

    if a.verbose {
        match queries::get_entry_count(ctx.conn, &a.sheet)? {
            0 => writeln!(ctx.out, "switched to empty timesheet \"{}\"", a.sheet)?,
            1 => writeln!(ctx.out, "switched to timesheet \"{}\" (1 entry)", a.sheet)?,
            n => writeln!(ctx.out, "switched to timesheet \"{}\" ({} entries)", a.sheet, n)?,
        }
    }

    Ok(Some(a.sheet))
}
