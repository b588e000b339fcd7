//! Ordered schema migrations.
//!
//! Every migration is registered in [`MIGRATIONS`] under a `<number><Name>`
//! id. Definitions sharing number and name form one module; a module is
//! applied in a single transaction together with the `db_version` bump.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use regex::Regex;
use rusqlite::{Connection, params};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static MIGRATION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(\D*)$").expect("migration id pattern"));

/// One step of a migration: plain DDL/DML, or Rust code for backfills.
#[derive(Clone, Copy)]
pub enum Step {
    Sql(&'static str),
    Code(fn(&Connection) -> AppResult<()>),
}

#[derive(Clone, Copy)]
pub struct MigrationDef {
    pub id: &'static str,
    pub steps: &'static [Step],
}

/// A discovered migration number with all its steps, in declaration order.
#[derive(Clone)]
pub struct MigrationModule {
    pub number: i64,
    pub name: String,
    pub steps: Vec<Step>,
}

pub const MIGRATIONS: &[MigrationDef] = &[
    MigrationDef {
        id: "0001InitialMigration",
        steps: &[Step::Sql(INITIAL_SCHEMA), Step::Sql(INITIAL_META)],
    },
    MigrationDef {
        id: "0002TicketMetadata",
        steps: &[Step::Sql(TICKET_METADATA)],
    },
    MigrationDef {
        id: "0003AddHourAdjustments",
        steps: &[Step::Sql(HOUR_ADJUSTMENTS)],
    },
    MigrationDef {
        id: "0004BackfillEntryDetails",
        steps: &[Step::Code(backfill_entry_details)],
    },
];

const INITIAL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS meta (
    key   VARCHAR(16) PRIMARY KEY NOT NULL,
    value VARCHAR(32) NOT NULL
);

CREATE TABLE IF NOT EXISTS entry (
    id          INTEGER PRIMARY KEY NOT NULL,
    sheet       VARCHAR(32) NOT NULL,
    start_time  INTEGER NOT NULL,
    end_time    INTEGER,
    description VARCHAR(64),
    extra       BLOB
);

CREATE TABLE IF NOT EXISTS entry_details (
    entry_id      INTEGER PRIMARY KEY NOT NULL,
    ticket_number INTEGER DEFAULT NULL,
    billable      INTEGER DEFAULT 0
);

CREATE TABLE IF NOT EXISTS holidays (
    year  INTEGER DEFAULT NULL,
    month INTEGER,
    day   INTEGER
);

CREATE TABLE IF NOT EXISTS unpaid (
    year  INTEGER DEFAULT NULL,
    month INTEGER,
    day   INTEGER
);

CREATE TABLE IF NOT EXISTS vacation (
    year  INTEGER DEFAULT NULL,
    month INTEGER,
    day   INTEGER
);

CREATE TABLE IF NOT EXISTS ticket_details (
    number  INTEGER,
    project TEXT,
    details TEXT
);

CREATE INDEX IF NOT EXISTS entry_sheet ON entry (sheet);
CREATE INDEX IF NOT EXISTS entry_start_time ON entry (start_time);
CREATE INDEX IF NOT EXISTS entry_end_time ON entry (end_time);
"#;

const INITIAL_META: &str = r#"
INSERT INTO meta (key, value) VALUES ('current_sheet', 'default')
ON CONFLICT(key) DO NOTHING;

INSERT INTO meta (key, value) VALUES ('db_version', '0')
ON CONFLICT(key) DO NOTHING;
"#;

const TICKET_METADATA: &str = r#"
CREATE TABLE IF NOT EXISTS entry_meta (
    entry_id INTEGER NOT NULL,
    key      VARCHAR(16) NOT NULL,
    value    VARCHAR(256) NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS entry_meta_entry_key ON entry_meta (entry_id, key);
"#;

const HOUR_ADJUSTMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS adjustments (
    timestamp   INTEGER NOT NULL,
    adjustment  FLOAT,
    description TEXT
);
"#;

/// Legacy `entry_details` rows become `ticket_number` / `billable` metadata.
/// Keys already present in `entry_meta` are left alone.
fn backfill_entry_details(conn: &Connection) -> AppResult<()> {
    let mut stmt = conn.prepare(
        "SELECT entry_id, ticket_number, billable
         FROM entry_details
         ORDER BY entry_id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<i64>>(1)?,
            row.get::<_, Option<i64>>(2)?,
        ))
    })?;

    let mut copied = 0usize;
    for r in rows {
        let (entry_id, ticket, billable) = r?;

        if let Some(ticket) = ticket {
            copied += conn.execute(
                "INSERT INTO entry_meta (entry_id, key, value) VALUES (?1, 'ticket_number', ?2)
                 ON CONFLICT(entry_id, key) DO NOTHING",
                params![entry_id, ticket.to_string()],
            )?;
        }

        let billable = if billable.unwrap_or(0) != 0 { "yes" } else { "no" };
        copied += conn.execute(
            "INSERT INTO entry_meta (entry_id, key, value) VALUES (?1, 'billable', ?2)
             ON CONFLICT(entry_id, key) DO NOTHING",
            params![entry_id, billable],
        )?;
    }

    log::debug!("backfilled {} entry_meta rows from entry_details", copied);
    Ok(())
}

/// Group and order migration definitions by number.
pub fn discover_from(defs: &[MigrationDef]) -> AppResult<Vec<MigrationModule>> {
    let mut modules: BTreeMap<i64, MigrationModule> = BTreeMap::new();

    for def in defs {
        let Some(caps) = MIGRATION_ID_RE.captures(def.id) else {
            log::warn!("ignoring migration with malformed id '{}'", def.id);
            continue;
        };
        let Ok(number) = caps[1].parse::<i64>() else {
            log::warn!("ignoring migration with out-of-range number '{}'", def.id);
            continue;
        };
        let name = caps[2].to_string();

        match modules.get_mut(&number) {
            Some(existing) if existing.name == name => {
                existing.steps.extend_from_slice(def.steps);
            }
            Some(existing) => {
                return Err(AppError::Migration(format!(
                    "ambiguous migration number {}: '{}' and '{}'",
                    number, existing.name, name
                )));
            }
            None => {
                modules.insert(
                    number,
                    MigrationModule {
                        number,
                        name,
                        steps: def.steps.to_vec(),
                    },
                );
            }
        }
    }

    Ok(modules.into_values().collect())
}

/// Apply every registered migration newer than the store's version.
pub fn upgrade(pool: &mut DbPool) -> AppResult<usize> {
    upgrade_with(pool, MIGRATIONS)
}

/// Returns how many modules were applied; 0 on an up-to-date store.
pub fn upgrade_with(pool: &mut DbPool, defs: &[MigrationDef]) -> AppResult<usize> {
    let modules = discover_from(defs)?;
    let mut applied = 0;

    for module in modules {
        if module.number <= pool.current_version()? {
            continue;
        }

        log::info!("applying migration #{} ({})", module.number, module.name);

        pool.with_transaction(|tx| {
            for step in &module.steps {
                match step {
                    Step::Sql(sql) => tx.execute_batch(sql)?,
                    Step::Code(func) => func(&**tx)?,
                }
            }
            register(tx, module.number)
        })
        .map_err(|e| match e {
            AppError::Migration(_) => e,
            other => AppError::Migration(format!(
                "#{} ({}): {}",
                module.number, module.name, other
            )),
        })?;

        applied += 1;
    }

    Ok(applied)
}

fn register(conn: &Connection, number: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO meta (key, value) VALUES ('db_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![number.to_string()],
    )?;
    Ok(())
}
