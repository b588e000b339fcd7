use crate::cli::commands::ask;
use crate::cli::parser::{ModifyArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::modify::{ModifyAnswers, ModifyLogic};
use crate::errors::AppResult;

/// Prompt for every field of an entry; empty answers keep the current value.
pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: ModifyArgs = parse_args("modify", args)?;

    let entry = ModifyLogic::load(ctx.conn, a.id)?;
    let [start_date, start_time, end_date, end_time] = ModifyLogic::defaults(&entry);

    writeln!(ctx.out, "Modifying entry #{} of \"{}\"", entry.id, entry.sheet)?;

    let mut prompt = |label: &str, current: &str| -> AppResult<String> {
        let question = if current.is_empty() {
            format!("{}: ", label)
        } else {
            format!("{} [{}]: ", label, current)
        };
        Ok(ask(ctx.out, ctx.input, &question)?.unwrap_or_default())
    };

    let answers = ModifyAnswers {
        start_date: prompt("Start date", &start_date)?,
        start_time: prompt("Start time", &start_time)?,
        end_date: prompt("End date", &end_date)?,
        end_time: prompt("End time", &end_time)?,
        description: prompt("Description", entry.description_or_empty())?,
    };

    let edited = ModifyLogic::resolve(&entry, &answers)?;
    ModifyLogic::apply(ctx.conn, &edited)?;

    Ok(Some(edited.id.to_string()))
}
