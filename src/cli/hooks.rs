//! Pre/post command hooks: external executables named in the configuration.
//!
//! Lookup order: the section named after the current sheet, then `hooks`.
//! Within a section `pre_<command>_hook` wins over `pre_hook` (same for post).

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Pre,
    Post,
}

impl HookPhase {
    fn as_str(&self) -> &'static str {
        match self {
            HookPhase::Pre => "pre",
            HookPhase::Post => "post",
        }
    }
}

pub struct HookRunner<'a> {
    config: &'a Config,
}

impl<'a> HookRunner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Configured command line of the hook, if any.
    pub fn resolve(&self, sheet: &str, phase: HookPhase, command: &str) -> Option<String> {
        let specific = format!("{}_{}_hook", phase.as_str(), command);
        let generic = format!("{}_hook", phase.as_str());

        [sheet, "hooks"].into_iter().find_map(|section| {
            self.config
                .get(section, &specific)
                .or_else(|| self.config.get(section, &generic))
                .filter(|h| !h.trim().is_empty())
        })
    }

    /// A failing pre-hook aborts the command.
    pub fn run_pre(&self, sheet: &str, command: &str, args: &[String]) -> AppResult<()> {
        let Some(hook) = self.resolve(sheet, HookPhase::Pre, command) else {
            return Ok(());
        };
        invoke(&hook, args).map_err(|reason| AppError::PreHookFailure { hook, reason })
    }

    /// Receives the command's result text after its arguments.
    pub fn run_post(
        &self,
        sheet: &str,
        command: &str,
        args: &[String],
        result: Option<&str>,
    ) -> AppResult<()> {
        let Some(hook) = self.resolve(sheet, HookPhase::Post, command) else {
            return Ok(());
        };

        let mut full = args.to_vec();
        if let Some(r) = result {
            full.push(r.to_string());
        }
        invoke(&hook, &full).map_err(|reason| AppError::PostHookFailure { hook, reason })
    }
}

/// Runs `hook` (program plus optional leading words) with `args` appended.
fn invoke(hook: &str, args: &[String]) -> Result<(), String> {
    let mut words = hook.split_whitespace();
    let program = words.next().ok_or_else(|| "empty hook".to_string())?;

    log::debug!("running hook '{}' with {:?}", hook, args);

    let status = Command::new(expand_tilde(program))
        .args(words)
        .args(args)
        .status()
        .map_err(|e| e.to_string())?;

    if status.success() {
        Ok(())
    } else {
        Err(match status.code() {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        })
    }
}
