use crate::cli::commands::{ask, is_yes};
use crate::cli::parser::{BackdateArgs, join_notes, parse_args};
use crate::cli::registry::CommandContext;
use crate::config::OverlapPolicy;
use crate::core::backdate::BackdateLogic;
use crate::errors::AppResult;
use crate::utils::time::{format_ts, parse_offset};

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let mut a: BackdateArgs = parse_args("backdate", args)?;

    // `t backdate 20m ago notes...` without quotes
    if parse_offset(&a.when).is_some() && a.notes.first().is_some_and(|w| w == "ago") {
        a.notes.remove(0);
        a.when.push_str(" ago");
    }

    let target = BackdateLogic::target(&a.when, ctx.now)?;
    let plan = BackdateLogic::plan(ctx.conn, target)?;

    if let Some(entry) = &plan.adjust
        && ctx.config.backdate_overlap == OverlapPolicy::Confirm
    {
        let question = format!(
            "adjust entry #{} end to {}? [y/N] ",
            entry.id,
            format_ts(target, "%Y-%m-%d %H:%M:%S")
        );
        let answer = ask(ctx.out, ctx.input, &question)?;
        if !is_yes(answer.as_deref()) {
            writeln!(ctx.out, "canceled")?;
            return Ok(None);
        }
    }

    let id = BackdateLogic::apply(ctx.conn, &plan, join_notes(&a.notes), a.meta.to_meta()?)?;
    Ok(Some(id.to_string()))
}
