use crate::cli::parser::{InArgs, join_notes, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::clock::{ClockIn, ClockLogic};
use crate::errors::AppResult;
use crate::utils::time::parse_date_time_or_now;

/// Start the timer; the new entry id is the result text.
pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: InArgs = parse_args("in", args)?;

    //
    // 1. Parse clock-in time and metadata
    //
    let at = parse_date_time_or_now(a.at.as_deref(), ctx.now)?;
    let meta = a.meta.to_meta()?;

    //
    // 2. Execute logic
    //
    let id = ClockLogic::clock_in(
        ctx.conn,
        ClockIn {
            switch: a.switch,
            at,
            out: a.out,
            resume: a.resume,
            notes: join_notes(&a.notes),
            meta,
        },
    )?;

    Ok(Some(id.to_string()))
}
