//! Runs one resolved command: pre-hook, handler (inside a write
//! transaction when the command locks), post-hook, activity report.

use crate::cli::hooks::HookRunner;
use crate::cli::registry::{CommandContext, Registry};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::integrations::reporting::reporting_user;
use crate::integrations::{ActivityReport, CachedTicketLookup, HttpReportingSink, ReportingSink, TicketLookup};
use crate::ui::messages::warning;
use std::io::{BufRead, Write};

/// Output and input streams of one invocation.
pub struct Io<'a> {
    pub out: &'a mut dyn Write,
    pub input: &'a mut dyn BufRead,
}

pub struct Dispatcher<'a> {
    registry: &'a Registry<'a>,
    config: &'a Config,
    reporter: Option<Box<dyn ReportingSink>>,
    lookup: Box<dyn TicketLookup>,
}

impl<'a> Dispatcher<'a> {
    /// Reporting is enabled by `reporting_url`; ticket lookups use the
    /// `chiliproject` section.
    pub fn new(registry: &'a Registry<'a>, config: &'a Config) -> Self {
        let reporter = config
            .reporting_url
            .as_deref()
            .map(|url| Box::new(HttpReportingSink::new(url)) as Box<dyn ReportingSink>);

        Self {
            registry,
            config,
            reporter,
            lookup: Box::new(CachedTicketLookup::from_config(config)),
        }
    }

    pub fn with_reporter(mut self, reporter: Option<Box<dyn ReportingSink>>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_lookup(mut self, lookup: Box<dyn TicketLookup>) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn run(
        &self,
        pool: &mut DbPool,
        token: &str,
        args: &[String],
        now: i64,
        io: Io<'_>,
    ) -> AppResult<Option<String>> {
        // 1) resolve
        let resolved = self.registry.resolve(token, args, self.config)?;
        let spec = resolved.spec;
        let args = resolved.args;
        log::debug!("dispatching '{}' as '{}' {:?}", token, spec.name, args);

        // 2) pre-hook, before any lock is taken
        let hooks = HookRunner::new(self.config);
        let sheet = queries::get_current_sheet(&pool.conn)?;
        hooks.run_pre(&sheet, spec.name, &args)?;

        // 3) handler
        let db_path = pool.path.clone();
        let Io { out, input } = io;
        let lookup: &dyn TicketLookup = self.lookup.as_ref();

        let result = if spec.locking {
            pool.with_transaction(|tx| {
                let mut ctx = CommandContext {
                    conn: tx,
                    config: self.config,
                    db_path: &db_path,
                    now,
                    out,
                    input,
                    lookup,
                };
                (spec.handler)(&mut ctx, &args)
            })?
        } else {
            let mut ctx = CommandContext {
                conn: &pool.conn,
                config: self.config,
                db_path: &db_path,
                now,
                out,
                input,
                lookup,
            };
            (spec.handler)(&mut ctx, &args)?
        };

        // 4) post-hook: the mutation stands whatever happens
        let sheet = queries::get_current_sheet(&pool.conn)?;
        if let Err(e) = hooks.run_post(&sheet, spec.name, &args, result.as_deref()) {
            log::debug!("{} failed after commit: {}", spec.name, e);
            warning(&e);
        }

        // 5) activity report for state-changing commands
        if !spec.read_only
            && let Some(reporter) = &self.reporter
        {
            let report = ActivityReport {
                user: reporting_user(self.config.user.as_deref()),
                command: spec.name.to_string(),
                current: sheet,
                since: queries::get_current_start_time(&pool.conn)?.map(|s| s.start_time),
                args: args.clone(),
            };
            if let Err(e) = reporter.report(&report) {
                warning(&e);
            }
        }

        Ok(result)
    }
}
