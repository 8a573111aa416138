//! `envdb check` — show env file and database settings status.
//!
//! - Shows the resolved env file path and whether it exists
//! - Shows the number of loaded keys
//! - Shows the resolved database settings, or why they don't resolve

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use envdb_core::config::TEMPLATE_FILE_NAME;
use envdb_core::db::DbSettings;

use crate::helpers::{load_store, mark, resolve_env_path};

/// Run the check command.
pub fn run(env_file: Option<&Path>) -> Result<()> {
    let env_path = resolve_env_path(env_file);
    let env_exists = env_path.is_file();

    println!();
    println!("{}", "envdb check".cyan().bold());
    println!();

    println!(
        "  {:<12} {} {}",
        "Env file:".bold(),
        env_path.display(),
        mark(env_exists, "not found")
    );

    if !env_exists {
        println!();
        println!(
            "  Create it from {} next to it.",
            TEMPLATE_FILE_NAME.bold()
        );
        println!();
        return Ok(());
    }

    let store = load_store(Some(env_path.as_path()))?;
    println!("  {:<12} {}", "Keys:".bold(), store.len());

    println!();
    println!("  {}", "Database:".bold());
    match DbSettings::from_store(store) {
        Ok(settings) => {
            println!("    {:<10} {}", "driver", settings.driver);
            println!(
                "    {:<10} {} {}",
                "path",
                settings.database.display(),
                mark(settings.database.is_file(), "not found")
            );
            println!("    {:<10} {} ms", "timeout", settings.busy_timeout_ms);
        }
        Err(e) => println!("    {} {}", "✗".red(), e),
    }
    println!();

    Ok(())
}
