use crate::cli::parser::{DisplayArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::report::{ReportEntry, ReportLogic};
use crate::core::sheet::SheetLogic;
use crate::db::{EntryFilter, queries};
use crate::errors::AppResult;
use crate::export::{DisplayFormat, csv, json};
use crate::utils::Table;
use crate::utils::time::{format_ts, hms, parse_date_time};

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: DisplayArgs = parse_args("display", args)?;

    //
    // 1. Resolve sheet
    //
    let sheet = match &a.sheet {
        Some(token) => SheetLogic::complete_sheet(ctx.conn, token)?,
        None => queries::get_current_sheet(ctx.conn)?,
    };

    //
    // 2. Build filter
    //
    let mut filter = EntryFilter::new().sheet(&sheet);
    if let Some(start) = &a.start {
        filter = filter.started_at_or_after(parse_date_time(start, ctx.now)?);
    }
    if let Some(end) = &a.end {
        filter = filter.ended_at_or_before(parse_date_time(end, ctx.now)?);
    }
    if a.format == DisplayFormat::Csv {
        filter = filter.closed();
    }

    //
    // 3. Render
    //
    let entries = ReportLogic::entries(ctx.conn, &filter, ctx.lookup, ctx.now)?;
    match a.format {
        DisplayFormat::Plain => write!(ctx.out, "{}", render_plain(&entries, a.ids))?,
        DisplayFormat::Csv => csv::write_csv(&mut *ctx.out, &entries)?,
        DisplayFormat::Json => json::write_json(&mut *ctx.out, &entries)?,
    }

    Ok(None)
}

/// Day-bucketed table with per-day subtotals and a `Total` footer.
pub fn render_plain(entries: &[ReportEntry], ids: bool) -> String {
    if entries.is_empty() {
        return "(empty)\n".to_string();
    }

    let row = |id: String, cells: [String; 5]| -> Vec<String> {
        let mut r = Vec::with_capacity(6);
        if ids {
            r.push(id);
        }
        r.extend(cells);
        r
    };

    let mut table = Table::new(row(
        "Id".into(),
        [
            "Day".into(),
            "Start      End".into(),
            "Duration".into(),
            "Notes".into(),
            "Billable".into(),
        ],
    ));

    let mut total = 0;
    for group in ReportLogic::by_day(entries) {
        for (i, e) in group.entries.iter().enumerate() {
            let day = if i == 0 {
                format_ts(e.entry.start_time, "%b %d, %Y")
            } else {
                String::new()
            };
            let start = format_ts(e.entry.start_time, "%H:%M:%S");
            let range = match e.entry.end_time {
                Some(end) => format!("{} - {}", start, format_ts(end, "%H:%M:%S")),
                None => format!("{} -", start),
            };
            let billable = if e.billable { "yes" } else { "no" };

            table.add_row(row(
                e.entry.id.to_string(),
                [day, range, hms(e.duration), e.notes.clone(), billable.into()],
            ));
        }

        table.add_row(row(
            String::new(),
            [
                String::new(),
                String::new(),
                hms(group.total),
                String::new(),
                String::new(),
            ],
        ));
        total += group.total;
    }

    table.add_row(row(
        String::new(),
        [
            "Total".into(),
            String::new(),
            hms(total),
            String::new(),
            String::new(),
        ],
    ));

    table.with_footer().render()
}
