//! envdb CLI — entry point.
//!
//! # Commands
//!
//! - `envdb get KEY [--default VALUE]` — print one configuration value
//! - `envdb show [--json] [--reveal]` — list all loaded keys
//! - `envdb check` — show env file and database settings status
//! - `envdb migrate --table T --column C --definition D [--dry-run]` — add a
//!   column unless it already exists

mod check;
mod helpers;
mod migrate_cmd;
mod show;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use envdb_core::config;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// envdb — .env loader and SQLite column migrations
#[derive(Parser)]
#[command(name = "envdb", version, about, long_about = None)]
struct Cli {
    /// Env file to load instead of `<project root>/.env`
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of a configuration key
    Get {
        key: String,

        /// Value printed when the key is not set
        #[arg(short, long)]
        default: Option<String>,
    },

    /// List every loaded key
    Show {
        /// Print as a JSON object
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Print secret values unmasked
        #[arg(long, default_value_t = false)]
        reveal: bool,
    },

    /// Show env file and database settings status
    Check,

    /// Add a column to a table unless it already exists
    Migrate {
        /// Table to alter
        #[arg(long)]
        table: String,

        /// Column to add
        #[arg(long)]
        column: String,

        /// Column type and constraints, e.g. "TEXT NOT NULL DEFAULT ''"
        #[arg(long)]
        definition: String,

        /// Only report whether the column would be added
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let env_file = cli.env_file.as_deref();
    match cli.command {
        Commands::Get { key, default } => run_get(env_file, &key, default.as_deref()),
        Commands::Show { json, reveal } => show::run(env_file, json, reveal),
        Commands::Check => check::run(env_file),
        Commands::Migrate {
            table,
            column,
            definition,
            dry_run,
            json,
        } => migrate_cmd::run(
            env_file,
            migrate_cmd::MigrateArgs {
                table,
                column,
                definition,
                dry_run,
                json,
            },
        ),
    }
}

fn run_get(env_file: Option<&std::path::Path>, key: &str, default: Option<&str>) -> Result<()> {
    if env_file.is_some() {
        helpers::load_store(env_file)?;
    }
    let value = config::get(key, default).context("failed to load configuration")?;
    match value {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => bail!("{key} is not set"),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("envdb_cli=debug,envdb_core=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
