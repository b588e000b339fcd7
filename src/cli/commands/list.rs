use crate::cli::parser::{ListArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::db::queries;
use crate::errors::AppResult;
use crate::utils::Table;
use crate::utils::time::{day_start, timedelta};

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: ListArgs = parse_args("list", args)?;

    if a.simple {
        for name in queries::get_sheet_names(ctx.conn)? {
            writeln!(ctx.out, "{}", name)?;
        }
        return Ok(None);
    }

    let sheets = queries::sheet_summaries(ctx.conn, ctx.now, day_start(ctx.now)?)?;
    if sheets.is_empty() {
        writeln!(ctx.out, "(no sheets)")?;
        return Ok(None);
    }

    let mut table = Table::new(vec![" Timesheet", "Running", "Today", "Total time"]);
    for s in sheets {
        let marker = if s.is_current { "*" } else { " " };
        let running = if s.running != 0 {
            timedelta(s.running)
        } else {
            "--".to_string()
        };
        table.add_row(vec![
            format!("{}{}", marker, s.sheet),
            running,
            timedelta(s.today),
            timedelta(s.total),
        ]);
    }

    write!(ctx.out, "{}", table.render())?;
    Ok(None)
}
