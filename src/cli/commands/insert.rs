use crate::cli::parser::{InsertArgs, join_notes, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::clock::ClockLogic;
use crate::db::queries;
use crate::errors::AppResult;
use crate::utils::time::parse_date_time;

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: InsertArgs = parse_args("insert", args)?;

    let start = parse_date_time(&a.start, ctx.now)?;
    let end = parse_date_time(&a.end, ctx.now)?;
    let description = join_notes(&a.description);

    let sheet = queries::get_current_sheet(ctx.conn)?;
    let id = ClockLogic::insert(ctx.conn, &sheet, start, end, description.as_deref())?;

    Ok(Some(id.to_string()))
}
