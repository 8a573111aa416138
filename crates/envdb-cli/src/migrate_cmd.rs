//! `envdb migrate` — add a column to a table unless it already exists.
//!
//! Loads the env file, resolves the database from `DB_*` settings, then runs
//! a single [`ColumnMigration`]. Any failure aborts with a non-zero exit.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use envdb_core::db::{ColumnMigration, DbSettings, MigrationOutcome, MigrationReport};

/// Arguments of `envdb migrate`.
pub struct MigrateArgs {
    pub table: String,
    pub column: String,
    pub definition: String,
    pub dry_run: bool,
    pub json: bool,
}

/// Run the migrate command.
pub fn run(env_file: Option<&Path>, args: MigrateArgs) -> Result<()> {
    let migration = ColumnMigration::new(&args.table, &args.column, &args.definition)
        .context("invalid migration")?;

    let store = crate::helpers::load_store(env_file)?;
    let settings = DbSettings::from_store(store).context("invalid database settings")?;
    info!(path = %settings.database.display(), dry_run = args.dry_run, "running migration");

    let report = execute(&settings, &migration, args.dry_run)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &migration);
    }
    Ok(())
}

/// Open the database and plan or apply `migration`.
pub fn execute(
    settings: &DbSettings,
    migration: &ColumnMigration,
    dry_run: bool,
) -> Result<MigrationReport> {
    let mut conn = settings
        .open()
        .with_context(|| format!("failed to open {}", settings.database.display()))?;

    let report = if dry_run {
        migration.plan(&conn)
    } else {
        migration.apply(&mut conn)
    };
    report.with_context(|| {
        format!(
            "migration {}.{} failed",
            migration.table(),
            migration.column()
        )
    })
}

fn print_report(report: &MigrationReport, migration: &ColumnMigration) {
    let target = format!("{}.{}", report.table, report.column);
    match report.outcome {
        MigrationOutcome::Added => {
            println!("  {} added column {}", "✓".green(), target.bold());
        }
        MigrationOutcome::AlreadyPresent => {
            println!("  {} column {} already exists", "·".dimmed(), target.bold());
        }
        MigrationOutcome::WouldAdd => {
            println!("  {} would run: {}", "→".cyan(), migration.alter_sql());
        }
    }
}
