//! Error types for the env loader and the database layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an env file.
///
/// Malformed lines are never errors; they are skipped by the parser.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The resolved env file does not exist. Fatal, never retried.
    #[error(
        "env file not found at {}; copy {} to {} and fill in the values",
        .path.display(),
        crate::config::TEMPLATE_FILE_NAME,
        crate::config::ENV_FILE_NAME
    )]
    FileNotFound { path: PathBuf },

    /// The file exists but could not be read (permissions, invalid UTF-8, ...).
    #[error("failed to read env file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while resolving database settings or running a migration.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("missing required setting {0}")]
    MissingSetting(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    InvalidSetting { key: &'static str, value: String },

    #[error("unsupported database driver {0:?} (only \"sqlite\" is supported)")]
    UnsupportedDriver(String),

    #[error("database file not found at {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("invalid SQL identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid column definition {0:?}")]
    InvalidDefinition(String),

    #[error("table {0:?} does not exist")]
    TableNotFound(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
