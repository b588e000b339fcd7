//! Path utilities: default config/database locations, expand ~.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `~/.config/timebook`, or the working directory when no home is known.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config").join("timebook"))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_file() -> PathBuf {
    config_dir().join("timebook.yml")
}

pub fn default_database_file() -> PathBuf {
    config_dir().join("sheets.db")
}
