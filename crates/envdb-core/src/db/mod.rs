//! SQLite connection settings and schema migrations.

pub mod migrate;
pub mod settings;

pub use migrate::{ColumnMigration, MigrationOutcome, MigrationReport};
pub use settings::DbSettings;
