use crate::cli::parser::{HoursArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::core::hours::{HoursDetails, HoursLogic};
use crate::core::payperiod::policy_for;
use crate::errors::AppResult;
use crate::utils::Table;
use crate::utils::time::format_ts;

const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let a: HoursArgs = parse_args("hours", args)?;

    let name = a
        .payperiod_type
        .as_deref()
        .unwrap_or(&ctx.config.payperiod_type);
    let policy = policy_for(name)?;
    log::debug!("hours: pay period policy {}", policy.name());

    let details = HoursLogic::details(ctx.conn, policy.as_ref(), ctx.now)?;
    let fields = fields(&details);

    match a.param {
        Some(param) => {
            if let Some((_, value)) = fields.iter().find(|(key, _)| *key == param) {
                writeln!(ctx.out, "{}", value)?;
            }
        }
        None => {
            let mut table = Table::new(vec!["Field", "Value"]);
            for (key, value) in fields {
                table.add_row(vec![key.to_string(), value]);
            }
            write!(ctx.out, "{}", table.render())?;
        }
    }

    Ok(None)
}

/// Display values, rounded only here.
fn fields(d: &HoursDetails) -> Vec<(&'static str, String)> {
    vec![
        ("expected", format!("{:.2}", d.expected)),
        ("actual", format!("{:.2}", d.actual)),
        ("vacation", format!("{:.2}", d.vacation)),
        ("unpaid", format!("{:.2}", d.unpaid)),
        ("holiday", format!("{:.2}", d.holiday)),
        ("balance", format!("{:.2}", d.balance)),
        ("out_time", format_ts(d.out_time, DATE_TIME)),
        ("begin_period", format_ts(d.begin_period, DATE_TIME)),
        ("end_period", format_ts(d.end_period, DATE_TIME)),
    ]
}
