#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use rtimebook::cli::dispatch::{Dispatcher, Io};
use rtimebook::cli::registry::Registry;
use rtimebook::config::Config;
use rtimebook::db::{DbPool, migrate};
use rtimebook::errors::AppResult;
use rtimebook::integrations::{CachedTicketLookup, ReportingSink};
use rtimebook::utils::time::local_to_timestamp;
use rusqlite::Connection;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn t() -> Command {
    cargo_bin_cmd!("t")
}

/// A temp dir holding a fresh database path and a (missing) config path,
/// so end-to-end runs never read the user's configuration.
pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn db(&self) -> String {
        self.path("sheets.db")
    }

    pub fn config(&self) -> String {
        self.path("timebook.yml")
    }

    pub fn path(&self, name: &str) -> String {
        let p: PathBuf = self.dir.path().join(name);
        p.to_string_lossy().to_string()
    }

    /// `t -C <config> -b <db> <args...>`
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = t();
        cmd.args(["-C", &self.config(), "-b", &self.db()]).args(args);
        cmd
    }
}

/// Unix timestamp of a local `YYYY-MM-DD HH:MM` wall-clock time.
pub fn at(s: &str) -> i64 {
    let ndt = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").expect("test time");
    local_to_timestamp(ndt).expect("local time")
}

/// In-memory store driven through the real dispatcher.
pub struct Session {
    pub pool: DbPool,
    pub config: Config,
    pub reporter: Option<Box<dyn Fn() -> Box<dyn ReportingSink>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut pool = DbPool::in_memory().expect("in-memory store");
        migrate::upgrade(&mut pool).expect("migrations");
        Self {
            pool,
            config,
            reporter: None,
        }
    }

    pub fn with_yaml(yaml: &str) -> Self {
        Self::with_config(Config::from_yaml(yaml).expect("test config"))
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn run(&mut self, now: i64, words: &[&str]) -> AppResult<String> {
        self.run_with_input(now, words, "")
    }

    /// Runs one command; returns what it wrote to stdout.
    pub fn run_with_input(&mut self, now: i64, words: &[&str], input: &str) -> AppResult<String> {
        let registry = Registry::builtin();
        let reporter = self.reporter.as_ref().map(|make| make());
        let dispatcher = Dispatcher::new(&registry, &self.config)
            .with_lookup(Box::new(CachedTicketLookup::offline()))
            .with_reporter(reporter);

        let (token, rest) = words.split_first().expect("a command word");
        let args: Vec<String> = rest.iter().map(|s| s.to_string()).collect();

        let mut out: Vec<u8> = Vec::new();
        let mut input = Cursor::new(input.as_bytes().to_vec());
        dispatcher.run(
            &mut self.pool,
            token,
            &args,
            now,
            Io {
                out: &mut out,
                input: &mut input,
            },
        )?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }
}
