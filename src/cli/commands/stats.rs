use crate::cli::parser::{StatsArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::report::ReportLogic;
use crate::db::EntryFilter;
use crate::errors::AppResult;
use crate::utils::Table;
use crate::utils::time::{hours, parse_date_time};
use std::collections::BTreeMap;

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: StatsArgs = parse_args("stats", args)?;

    let mut filter = EntryFilter::new();
    if let Some(start) = &a.start {
        filter = filter.started_at_or_after(parse_date_time(start, ctx.now)?);
    }
    if let Some(end) = &a.end {
        filter = filter.started_before(parse_date_time(end, ctx.now)?);
    }

    let stats = ReportLogic::stats(ctx.conn, &filter, ctx.lookup, ctx.now)?;

    write!(ctx.out, "{}", hours_table("Timesheet", &stats.by_sheet))?;
    writeln!(ctx.out)?;
    write!(ctx.out, "{}", hours_table("Project", &stats.by_project))?;
    writeln!(ctx.out)?;
    write!(ctx.out, "{}", hours_table("Ticket", &stats.by_ticket))?;

    Ok(None)
}

fn hours_table(label: &str, totals: &BTreeMap<String, i64>) -> String {
    let mut table = Table::new(vec![label, "Hours"]);
    for (key, secs) in totals {
        table.add_row(vec![key.clone(), format!("{:.2}", hours(*secs))]);
    }
    table.render()
}
