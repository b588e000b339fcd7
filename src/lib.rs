//! rtimebook library root.
//! Exposes the CLI parser, the command dispatcher and the high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod integrations;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::dispatch::{Dispatcher, Io};
use cli::parser::{Cli, Commands};
use cli::registry::Registry;
use config::Config;
use db::{DbPool, migrate};
use errors::{AppError, AppResult};
use std::io;

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1) parse CLI
    let cli = Cli::parse();

    // 2) load configuration once
    let mut cfg = Config::load(cli.config.as_deref())?;

    // 3) command-line database override
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let registry = Registry::builtin();
    let Some(Commands::External(words)) = cli.command else {
        print!("{}", registry.command_list());
        return Err(AppError::Usage("error: no command specified".into()));
    };

    // 4) open the store and bring the schema up to date
    let mut pool = DbPool::new(&cfg.database)?;
    let applied = migrate::upgrade(&mut pool)?;
    if applied > 0 {
        log::info!("applied {} migration(s) to {}", applied, cfg.database);
    }

    // 5) dispatch
    let mut words = words.into_iter().map(|w| w.to_string_lossy().to_string());
    let token = words.next().unwrap_or_default();
    let args: Vec<String> = words.collect();

    let stdout = io::stdout();
    let stdin = io::stdin();
    let mut out = stdout.lock();
    let mut input = stdin.lock();

    let now = chrono::Local::now().timestamp();
    Dispatcher::new(&registry, &cfg).run(
        &mut pool,
        &token,
        &args,
        now,
        Io {
            out: &mut out,
            input: &mut input,
        },
    )?;
    Ok(())
}
