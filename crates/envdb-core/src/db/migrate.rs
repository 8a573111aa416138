//! Conditional `ALTER TABLE ... ADD COLUMN` migrations.
//!
//! A [`ColumnMigration`] adds one column to an existing table unless a
//! column with that name (case-insensitive) is already there, so running it
//! repeatedly is safe.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::DbError;

/// What a migration did, or would do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// The column was added.
    Added,
    /// The column already existed; nothing was executed.
    AlreadyPresent,
    /// Dry run: the column is missing and would be added.
    WouldAdd,
}

/// Result of running a migration, suitable for `--json` output.
#[derive(Clone, Debug, Serialize)]
pub struct MigrationReport {
    pub table: String,
    pub column: String,
    pub definition: String,
    pub outcome: MigrationOutcome,
    pub checked_at: DateTime<Utc>,
}

/// Add `column` to `table` with the given SQL type/constraint `definition`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMigration {
    table: String,
    column: String,
    definition: String,
}

impl ColumnMigration {
    /// Validate names and build a migration.
    ///
    /// `table` and `column` must match `[A-Za-z_][A-Za-z0-9_]*`. The
    /// definition (e.g. `TEXT NOT NULL DEFAULT ''`) is passed through as-is
    /// but may not be empty or contain `;` anywhere, so a literal such as
    /// `DEFAULT ';'` is rejected too.
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        definition: impl AsRef<str>,
    ) -> Result<Self, DbError> {
        let table: String = table.into();
        let column: String = column.into();
        let definition = definition.as_ref().trim().to_string();

        for name in [&table, &column] {
            if !is_identifier(name) {
                return Err(DbError::InvalidIdentifier(name.clone()));
            }
        }
        if definition.is_empty() || definition.contains(';') {
            return Err(DbError::InvalidDefinition(definition));
        }

        Ok(ColumnMigration {
            table,
            column,
            definition,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Report what [`apply`](Self::apply) would do without changing anything.
    pub fn plan(&self, conn: &Connection) -> Result<MigrationReport, DbError> {
        let outcome = if self.column_present(conn)? {
            MigrationOutcome::AlreadyPresent
        } else {
            MigrationOutcome::WouldAdd
        };
        Ok(self.report(outcome))
    }

    /// Add the column if it is missing. Check and alter share one transaction.
    pub fn apply(&self, conn: &mut Connection) -> Result<MigrationReport, DbError> {
        let tx = conn.transaction()?;

        if self.column_present(&tx)? {
            debug!(table = %self.table, column = %self.column, "column already present");
            tx.commit()?;
            return Ok(self.report(MigrationOutcome::AlreadyPresent));
        }

        tx.execute(&self.alter_sql(), [])?;
        tx.commit()?;
        info!(table = %self.table, column = %self.column, "column added");
        Ok(self.report(MigrationOutcome::Added))
    }

    /// The `ALTER TABLE` statement this migration runs.
    pub fn alter_sql(&self) -> String {
        format!(
            "ALTER TABLE \"{}\" ADD COLUMN \"{}\" {}",
            self.table, self.column, self.definition
        )
    }

    fn column_present(&self, conn: &Connection) -> Result<bool, DbError> {
        if !table_exists(conn, &self.table)? {
            return Err(DbError::TableNotFound(self.table.clone()));
        }
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM pragma_table_info(?1) WHERE name = ?2 COLLATE NOCASE",
                params![self.table, self.column],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn report(&self, outcome: MigrationOutcome) -> MigrationReport {
        MigrationReport {
            table: self.table.clone(),
            column: self.column.clone(),
            definition: self.definition.clone(),
            outcome,
            checked_at: Utc::now(),
        }
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool, DbError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            params![table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
