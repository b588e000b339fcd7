use crate::cli::parser::{PostArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::report::ReportLogic;
use crate::core::sheet::DEFAULT_SHEET;
use crate::db::EntryFilter;
use crate::errors::{AppError, AppResult};
use crate::integrations::poster::{PostEntry, TimesheetPoster, form_fields};
use crate::utils::time::{format_ts, local_date, local_to_timestamp, parse_date_time};
use chrono::{Duration, NaiveTime};

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: PostArgs = parse_args("post", args)?;

    let date = match &a.date {
        Some(d) => local_date(parse_date_time(d, ctx.now)?),
        None => local_date(ctx.now),
    };
    let begin = local_to_timestamp(date.and_time(NaiveTime::MIN))?;
    let end = local_to_timestamp((date + Duration::days(1)).and_time(NaiveTime::MIN))?;

    let filter = EntryFilter::new()
        .sheet(DEFAULT_SHEET)
        .started_at_or_after(begin)
        .started_before(end)
        .closed();

    let entries: Vec<PostEntry> = ReportLogic::entries(ctx.conn, &filter, ctx.lookup, ctx.now)?
        .into_iter()
        .map(|e| {
            let end_time = e.entry.end_or(ctx.now);
            PostEntry {
                start_hour: format_ts(e.entry.start_time, "%H"),
                start_min: format_ts(e.entry.start_time, "%M"),
                end_hour: format_ts(end_time, "%H"),
                end_min: format_ts(end_time, "%M"),
                ticket: e.ticket,
                description: e.entry.description.unwrap_or_default(),
                billable: e.billable,
            }
        })
        .collect();
    let fields = form_fields(date, &entries);

    if a.fake {
        for (key, value) in &fields {
            writeln!(ctx.out, "{}={}", key, value)?;
        }
        return Ok(None);
    }

    let username = ctx
        .config
        .get("auth", "username")
        .ok_or_else(|| AppError::Config("auth.username is not set".into()))?;
    let password = ctx
        .config
        .get("auth", "password")
        .ok_or_else(|| AppError::Config("auth.password is not set".into()))?;

    let poster = TimesheetPoster::from_config(ctx.config);
    poster.login(&username, &password)?;
    let status = poster.post(date, &fields)?;
    log::info!("post: {} entries for {} answered {}", entries.len(), date, status);

    writeln!(ctx.out, "posted {} entries for {}", entries.len(), date.format("%Y-%m-%d"))?;
    Ok(None)
}
