use crate::cli::parser::{RunningArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::db::queries;
use crate::errors::AppResult;
use crate::utils::Table;

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let _: RunningArgs = parse_args("running", args)?;

    let mut active = queries::get_active_entries(ctx.conn)?;
    active.sort_by(|a, b| a.sheet.cmp(&b.sheet));

    let mut table = Table::new(vec!["Timesheet", "Description"]);
    for e in active {
        let description = e
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "--".to_string());
        table.add_row(vec![e.sheet, description]);
    }

    write!(ctx.out, "{}", table.render())?;
    Ok(None)
}
