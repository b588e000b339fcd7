use crate::cli::parser::{BackendArgs, parse_args};
use crate::cli::registry::CommandContext;
use crate::errors::{AppError, AppResult};
use std::process::Command;

pub fn handle(ctx: &mut CommandContext<'_>, args: &[String]) -> AppResult<Option<String>> {
    let _: BackendArgs = parse_args("backend", args)?;

    let status = Command::new("sqlite3").arg(ctx.db_path).status()?;
    if !status.success() {
        return Err(AppError::Storage {
            path: ctx.db_path.to_string(),
            reason: format!("sqlite3 exited with {}", status),
        });
    }
    Ok(None)
}
