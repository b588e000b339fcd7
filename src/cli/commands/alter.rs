use crate::cli::parser::{AlterArgs, join_notes, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::clock::ClockLogic;
use crate::errors::AppResult;

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: AlterArgs = parse_args("alter", args)?;

    let notes = join_notes(&a.notes);
    let meta = a.meta.to_meta()?;

    let id = ClockLogic::alter(ctx.conn, a.id, notes.as_deref(), &meta, ctx.now)?;
    Ok(Some(id.to_string()))
}
