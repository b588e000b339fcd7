//! Built-in command table and command-name resolution.

use crate::cli::commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::integrations::TicketLookup;
use crate::utils::{Completion, complete};
use rusqlite::Connection;
use std::io::{BufRead, Write};

/// Everything a handler may touch during one invocation.
pub struct CommandContext<'a> {
    /// The open transaction for locking commands, the plain connection otherwise.
    pub conn: &'a Connection,
    pub config: &'a Config,
    pub db_path: &'a str,
    pub now: i64,
    pub out: &'a mut dyn Write,
    pub input: &'a mut dyn BufRead,
    pub lookup: &'a dyn TicketLookup,
}

/// Returns the result text handed to post-hooks (e.g. a new entry id).
pub type Handler = fn(&mut CommandContext<'_>, &[String]) -> AppResult<Option<String>>;

pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    /// Runs inside a write transaction.
    pub locking: bool,
    /// Successful runs are not reported.
    pub read_only: bool,
    pub handler: Handler,
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "alter",
        description: "alter the description of the active period",
        aliases: &["write"],
        locking: true,
        read_only: false,
        handler: commands::alter::handle,
    },
    CommandSpec {
        name: "backdate",
        description: "start the timer at an earlier time",
        aliases: &[],
        locking: true,
        read_only: false,
        handler: commands::backdate::handle,
    },
    CommandSpec {
        name: "backend",
        description: "run an interactive database session",
        aliases: &["shell"],
        locking: false,
        read_only: true,
        handler: commands::backend::handle,
    },
    CommandSpec {
        name: "display",
        description: "display timesheet, by default the current one",
        aliases: &["export", "format", "show"],
        locking: false,
        read_only: true,
        handler: commands::display::handle,
    },
    CommandSpec {
        name: "hours",
        description: "show expected and actual hours of the pay period",
        aliases: &["payperiod"],
        locking: false,
        read_only: true,
        handler: commands::hours::handle,
    },
    CommandSpec {
        name: "in",
        description: "start the timer for the current timesheet",
        aliases: &["start"],
        locking: true,
        read_only: false,
        handler: commands::start::handle,
    },
    CommandSpec {
        name: "insert",
        description: "insert a closed period into the current timesheet",
        aliases: &[],
        locking: true,
        read_only: false,
        handler: commands::insert::handle,
    },
    CommandSpec {
        name: "kill",
        description: "delete a timesheet",
        aliases: &["delete"],
        locking: true,
        read_only: false,
        handler: commands::kill::handle,
    },
    CommandSpec {
        name: "list",
        description: "show the available timesheets",
        aliases: &["ls"],
        locking: false,
        read_only: true,
        handler: commands::list::handle,
    },
    CommandSpec {
        name: "modify",
        description: "interactively edit an entry",
        aliases: &[],
        locking: true,
        read_only: false,
        handler: commands::modify::handle,
    },
    CommandSpec {
        name: "now",
        description: "show the status of the current timesheet",
        aliases: &["info"],
        locking: false,
        read_only: true,
        handler: commands::now::handle,
    },
    CommandSpec {
        name: "out",
        description: "stop the timer for the current timesheet",
        aliases: &["stop"],
        locking: true,
        read_only: false,
        handler: commands::stop::handle,
    },
    CommandSpec {
        name: "post",
        description: "post a day of the default timesheet to the web timesheet",
        aliases: &[],
        locking: false,
        read_only: true,
        handler: commands::post::handle,
    },
    CommandSpec {
        name: "running",
        description: "show all running timesheets",
        aliases: &["active"],
        locking: false,
        read_only: true,
        handler: commands::running::handle,
    },
    CommandSpec {
        name: "stats",
        description: "show hours per timesheet, project and ticket",
        aliases: &[],
        locking: false,
        read_only: true,
        handler: commands::stats::handle,
    },
    CommandSpec {
        name: "switch",
        description: "switch to a new timesheet",
        aliases: &[],
        locking: true,
        read_only: false,
        handler: commands::switch::handle,
    },
];

/// A resolved command plus words a user alias prepends to the arguments.
pub struct Resolved<'r> {
    pub spec: &'r CommandSpec,
    pub args: Vec<String>,
}

pub struct Registry<'r> {
    commands: &'r [CommandSpec],
}

impl Registry<'static> {
    pub fn builtin() -> Self {
        Self::new(COMMANDS)
    }
}

impl<'r> Registry<'r> {
    pub fn new(commands: &'r [CommandSpec]) -> Self {
        Self { commands }
    }

    /// Exact name or built-in alias.
    pub fn find(&self, token: &str) -> Option<&'r CommandSpec> {
        self.commands
            .iter()
            .find(|c| c.name == token)
            .or_else(|| self.commands.iter().find(|c| c.aliases.contains(&token)))
    }

    /// Exact name, built-in alias, user alias (`aliases` section), then a
    /// unique prefix of a command name.
    pub fn resolve(&self, token: &str, args: &[String], config: &Config) -> AppResult<Resolved<'r>> {
        if let Some(spec) = self.find(token) {
            return Ok(Resolved {
                spec,
                args: args.to_vec(),
            });
        }

        if let Some(expansion) = config.alias(token) {
            let mut words = expansion.split_whitespace();
            if let Some(spec) = words.next().and_then(|w| self.find(w)) {
                let mut full: Vec<String> = words.map(str::to_string).collect();
                full.extend_from_slice(args);
                log::debug!("alias '{}' expands to '{}'", token, expansion);
                return Ok(Resolved { spec, args: full });
            }
            log::warn!("alias '{}' does not name a command: '{}'", token, expansion);
        }

        match complete(self.commands.iter().map(|c| c.name), token) {
            Completion::Found(name) => {
                let spec = self
                    .find(name)
                    .ok_or_else(|| AppError::UnknownCommand(token.to_string()))?;
                Ok(Resolved {
                    spec,
                    args: args.to_vec(),
                })
            }
            Completion::Ambiguous(candidates) => Err(AppError::AmbiguousCommand {
                token: token.to_string(),
                candidates,
            }),
            Completion::NoMatch => Err(AppError::UnknownCommand(token.to_string())),
        }
    }

    /// `name    description` lines, for `t` without a command.
    pub fn command_list(&self) -> String {
        let width = self.commands.iter().map(|c| c.name.len()).max().unwrap_or(0);
        let mut out = String::from("Commands:\n");
        for c in self.commands {
            out.push_str(&format!("  {:<width$}   {}\n", c.name, c.description, width = width));
        }
        out
    }
}
