//! `envdb show` — list every loaded key.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use envdb_core::config::ConfigStore;
use envdb_core::utils::{is_secret_key, mask_value, truncate_string};

const MAX_VALUE_WIDTH: usize = 60;

/// Run the show command.
pub fn run(env_file: Option<&Path>, json: bool, reveal: bool) -> Result<()> {
    let store = crate::helpers::load_store(env_file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(store, reveal))?);
        return Ok(());
    }

    if let Some(source) = store.source() {
        println!("{}", source.display().to_string().dimmed());
    }
    if store.is_empty() {
        println!("{}", "(no keys)".dimmed());
        return Ok(());
    }

    let pairs = store.sorted();
    let width = key_width(&pairs);
    for (key, value) in pairs {
        let shown = display_value(key, value, reveal);
        println!(
            "  {:<width$}  {}",
            key.bold(),
            truncate_string(&shown, MAX_VALUE_WIDTH)
        );
    }
    Ok(())
}

/// Widest key, in characters, since `{:<width$}` pads by characters.
fn key_width(pairs: &[(&str, &str)]) -> usize {
    pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0)
}

fn display_value(key: &str, value: &str, reveal: bool) -> String {
    if !reveal && is_secret_key(key) {
        mask_value(value)
    } else {
        value.to_string()
    }
}

/// Sorted key/value object, secrets masked unless `reveal`.
fn to_json(store: &ConfigStore, reveal: bool) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = store
        .sorted()
        .into_iter()
        .map(|(k, v)| (k.to_string(), display_value(k, v, reveal).into()))
        .collect();
    serde_json::Value::Object(map)
}
