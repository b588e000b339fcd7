use crate::errors::{AppError, AppResult};
use crate::utils::path::{default_config_file, default_database_file, expand_tilde};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// What `backdate` does when the new start cuts into an earlier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Move the overlapping entry's end to the new start without asking.
    #[default]
    Adjust,
    /// Ask before moving the overlapping entry's end.
    Confirm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_payperiod_type")]
    pub payperiod_type: String,
    #[serde(default)]
    pub reporting_url: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub backdate_overlap: OverlapPolicy,

    /// Every other top-level key is a section of string options
    /// (`aliases`, `hooks`, per-sheet hook sections, `auth`, ...).
    #[serde(flatten, default)]
    pub sections: BTreeMap<String, BTreeMap<String, Value>>,
}

fn default_database() -> String {
    default_database_file().to_string_lossy().to_string()
}

fn default_payperiod_type() -> String {
    "MonthlyOnSecondToLastFriday".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            payperiod_type: default_payperiod_type(),
            reporting_url: None,
            user: None,
            backdate_overlap: OverlapPolicy::default(),
            sections: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from `path` (or the default location).
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let path = match path {
            Some(p) => expand_tilde(p),
            None => default_config_file(),
        };

        if !path.exists() {
            log::debug!("no configuration at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        Self::from_file(&path)
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml(&content).map_err(|e| match e {
            AppError::Config(msg) => AppError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let mut cfg: Config =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Sectioned view: `get("auth", "username")`.
    pub fn get(&self, section: &str, option: &str) -> Option<String> {
        let value = self.sections.get(section)?.get(option)?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.get(section, option).is_some()
    }

    pub fn get_or(&self, section: &str, option: &str, default: &str) -> String {
        self.get(section, option)
            .unwrap_or_else(|| default.to_string())
    }

    /// User-configured alias table (`aliases` section).
    pub fn alias(&self, token: &str) -> Option<String> {
        self.get("aliases", token)
    }
}
