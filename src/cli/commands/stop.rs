use crate::cli::parser::{OutArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::clock::ClockLogic;
use crate::errors::AppResult;
use crate::utils::time::{parse_date_time_or_now, timedelta};

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: OutArgs = parse_args("out", args)?;
    let at = parse_date_time_or_now(a.at.as_deref(), ctx.now)?;

    if a.all {
        let closed = ClockLogic::clock_out_all(ctx.conn, at)?;
        if a.verbose {
            for p in &closed {
                writeln!(ctx.out, "#{}: {}", p.entry_id, timedelta(p.duration))?;
            }
        }
        let ids: Vec<String> = closed.iter().map(|p| p.entry_id.to_string()).collect();
        return Ok(Some(ids.join(" ")));
    }

    let closed = ClockLogic::clock_out(ctx.conn, at)?;
    if a.verbose {
        writeln!(ctx.out, "{}", timedelta(closed.duration))?;
    }
    Ok(Some(closed.entry_id.to_string()))
}
