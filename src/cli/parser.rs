use crate::errors::{AppError, AppResult};
use crate::export::DisplayFormat;
use crate::models::EntryMeta;
use crate::models::entry::{META_BILLABLE, META_TICKET};
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;

/// Command-line interface definition for timebook
/// Personal time tracker: clock in and out of named timesheets
#[derive(Parser, Debug)]
#[command(
    name = "t",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal time tracker: clock in and out of named timesheets stored in SQLite",
    long_about = None,
    after_help = "Run `t <command> --help` for the options of a command."
)]
pub struct Cli {
    /// Configuration file (default: ~/.config/timebook/timebook.yml)
    #[arg(short = 'C', long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override database path (useful for tests or custom DB)
    #[arg(short = 'b', long = "db", value_name = "FILE")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Command names are resolved by the registry (aliases, prefixes, user
/// aliases), so clap only hands the raw words over.
#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(external_subcommand)]
    External(Vec<OsString>),
}

/// Parse the arguments of one command. `--help` comes back as
/// `AppError::Help`, every other problem as `AppError::Usage`.
pub fn parse_args<T: Parser>(name: &str, args: &[String]) -> AppResult<T> {
    let argv = std::iter::once(name.to_string()).chain(args.iter().cloned());
    T::try_parse_from(argv).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            AppError::Help(e.render().to_string())
        }
        _ => AppError::Usage(e.render().to_string().trim_end().to_string()),
    })
}

/// Metadata options shared by `in`, `alter` and `backdate`.
#[derive(Args, Debug, Default, Clone)]
pub struct MetaArgs {
    /// Ticket number of this period
    #[arg(short = 't', long = "ticket", value_name = "TICKET")]
    pub ticket: Option<String>,

    /// Mark the period as billable
    #[arg(long = "billable", conflicts_with = "non_billable")]
    pub billable: bool,

    /// Mark the period as not billable
    #[arg(long = "non-billable")]
    pub non_billable: bool,

    /// Free attribute, repeatable
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    pub meta: Vec<String>,
}

impl MetaArgs {
    pub fn to_meta(&self) -> AppResult<EntryMeta> {
        let mut meta = EntryMeta::new();

        for kv in &self.meta {
            let (k, v) = kv
                .split_once('=')
                .filter(|(k, _)| !k.trim().is_empty())
                .ok_or_else(|| AppError::InvalidFormat(format!("expected KEY=VALUE, got '{}'", kv)))?;
            meta.insert(k.trim().to_string(), v.trim().to_string());
        }

        if let Some(t) = &self.ticket {
            meta.insert(META_TICKET.to_string(), t.trim().to_string());
        }
        if self.billable {
            meta.insert(META_BILLABLE.to_string(), "yes".to_string());
        }
        if self.non_billable {
            meta.insert(META_BILLABLE.to_string(), "no".to_string());
        }
        Ok(meta)
    }
}

/// Words joined by single spaces; `None` when there are none.
pub fn join_notes(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "in",
    about = "Start the timer for the current timesheet",
    long_about = "Start the timer for the current timesheet. Must be called before out. \
                  Notes may be specified for this period."
)]
pub struct InArgs {
    /// Notes for this period
    pub notes: Vec<String>,

    /// Switch to another timesheet before starting the timer
    #[arg(short = 's', long = "switch", value_name = "SHEET")]
    pub switch: Option<String>,

    /// Clock out before clocking in
    #[arg(short = 'o', long = "out")]
    pub out: bool,

    /// Time of clock-in
    #[arg(short = 'a', long = "at", value_name = "TIME")]
    pub at: Option<String>,

    /// Clock in with the notes and metadata of the last period
    #[arg(short = 'r', long = "resume")]
    pub resume: bool,

    #[command(flatten)]
    pub meta: MetaArgs,
}

#[derive(Parser, Debug)]
#[command(name = "out", about = "Stop the timer for the current timesheet")]
pub struct OutArgs {
    /// Show the duration of the period that ends
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Time of clock-out
    #[arg(short = 'a', long = "at", value_name = "TIME")]
    pub at: Option<String>,

    /// Stop the timer of every running timesheet
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "switch",
    about = "Switch to a new timesheet",
    long_about = "Switch to a new timesheet. All future operations (except switch) \
                  operate on that timesheet. The default timesheet is called \"default\"."
)]
pub struct SwitchArgs {
    pub sheet: String,

    /// Print the name and number of entries of the timesheet
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "alter", about = "Alter the description of the active period")]
pub struct AlterArgs {
    /// New notes; the description is kept when omitted
    pub notes: Vec<String>,

    /// Alter this entry instead of the active one
    #[arg(long = "id", value_name = "ID")]
    pub id: Option<i64>,

    #[command(flatten)]
    pub meta: MetaArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "kill",
    about = "Delete a timesheet",
    long_about = "Delete a timesheet. If no timesheet is specified, delete the current \
                  timesheet and switch to the default timesheet."
)]
pub struct KillArgs {
    pub sheet: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "backdate",
    about = "Start the timer at an earlier time",
    long_about = "Stop the running period and start a new one at an earlier time, given \
                  as an offset (\"1h 20m ago\") or a date/time. A single earlier period \
                  crossing that time is shortened to end there."
)]
pub struct BackdateArgs {
    /// Offset (`<n>d|h|m|s ... [ago]`) or date/time
    #[arg(value_name = "OFFSET_OR_DATETIME")]
    pub when: String,

    /// Notes for the new period
    pub notes: Vec<String>,

    #[command(flatten)]
    pub meta: MetaArgs,
}

#[derive(Parser, Debug)]
#[command(name = "modify", about = "Interactively edit an entry")]
pub struct ModifyArgs {
    pub id: i64,
}

#[derive(Parser, Debug)]
#[command(name = "insert", about = "Insert a closed period into the current timesheet")]
pub struct InsertArgs {
    pub start: String,
    pub end: String,
    #[arg(required = true)]
    pub description: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(name = "display", about = "Display a timesheet, by default the current one")]
pub struct DisplayArgs {
    pub sheet: Option<String>,

    /// Show only entries starting at or after this date
    #[arg(short = 's', long = "start", value_name = "DATE")]
    pub start: Option<String>,

    /// Show only entries ending at or before this date
    #[arg(short = 'e', long = "end", value_name = "DATE")]
    pub end: Option<String>,

    #[arg(short = 'f', long = "format", value_enum, default_value = "plain")]
    pub format: DisplayFormat,

    /// Show entry ids
    #[arg(short = 'i', long = "ids")]
    pub ids: bool,
}

#[derive(Parser, Debug)]
#[command(name = "list", about = "Show the available timesheets")]
pub struct ListArgs {
    /// Only display the names of the available timesheets
    #[arg(short = 's', long = "simple")]
    pub simple: bool,
}

#[derive(Parser, Debug)]
#[command(name = "now", about = "Show the status of the current timesheet")]
pub struct NowArgs {
    pub sheet: Option<String>,

    /// Only display the name of the current timesheet
    #[arg(short = 's', long = "simple")]
    pub simple: bool,

    /// Only display the notes of the current period
    #[arg(short = 'n', long = "notes")]
    pub notes: bool,
}

#[derive(Parser, Debug)]
#[command(name = "running", about = "Show all running timesheets")]
pub struct RunningArgs {}

#[derive(Parser, Debug)]
#[command(name = "stats", about = "Show hours per timesheet, project and ticket")]
pub struct StatsArgs {
    #[arg(short = 's', long = "start", value_name = "DATE")]
    pub start: Option<String>,

    #[arg(short = 'e', long = "end", value_name = "DATE")]
    pub end: Option<String>,
}

#[derive(Parser, Debug)]
#[command(name = "hours", about = "Show expected and actual hours of the pay period")]
pub struct HoursArgs {
    /// Print a single value
    #[arg(
        long = "param",
        value_name = "NAME",
        value_parser = [
            "expected", "actual", "vacation", "unpaid", "holiday",
            "balance", "out_time", "begin_period", "end_period",
        ]
    )]
    pub param: Option<String>,

    /// Pay period policy, overriding the configuration
    #[arg(long = "payperiod-type", value_name = "TYPE")]
    pub payperiod_type: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "backend",
    about = "Open an interactive sqlite3 session on the database"
)]
pub struct BackendArgs {}

#[derive(Parser, Debug)]
#[command(name = "post", about = "Post a day of the default timesheet to the web timesheet")]
pub struct PostArgs {
    /// Day to post (default: today)
    #[arg(long = "date", value_name = "DATE")]
    pub date: Option<String>,

    /// Print the form instead of sending it
    #[arg(long = "fake")]
    pub fake: bool,
}
