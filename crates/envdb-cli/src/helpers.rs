//! Shared CLI helpers — env loading and status marks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use envdb_core::config::{self, ConfigStore};

/// Load the process-wide store from `env_file` or the default location.
///
/// Values are also exported to this process's environment.
pub fn load_store(env_file: Option<&Path>) -> Result<&'static ConfigStore> {
    config::load(env_file).context("failed to load configuration")
}

/// The env file path a load would use.
pub fn resolve_env_path(env_file: Option<&Path>) -> PathBuf {
    env_file
        .map(PathBuf::from)
        .unwrap_or_else(config::default_env_path)
}

/// Green check or red note, for status lines.
pub fn mark(ok: bool, missing: &str) -> String {
    if ok {
        "✓".green().to_string()
    } else {
        format!("({missing})").red().to_string()
    }
}
