//! Database connection settings derived from the env store.
//!
//! | Key                  | Default  | Notes                                   |
//! |----------------------|----------|-----------------------------------------|
//! | `DB_CONNECTION`      | `sqlite` | only `sqlite` is supported              |
//! | `DB_DATABASE`        | required | relative paths resolve next to `.env`   |
//! | `DB_BUSY_TIMEOUT_MS` | `5000`   | milliseconds                            |

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use tracing::debug;

use crate::config::ConfigStore;
use crate::error::DbError;

pub const KEY_CONNECTION: &str = "DB_CONNECTION";
pub const KEY_DATABASE: &str = "DB_DATABASE";
pub const KEY_BUSY_TIMEOUT_MS: &str = "DB_BUSY_TIMEOUT_MS";

const DEFAULT_DRIVER: &str = "sqlite";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Resolved connection settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DbSettings {
    pub driver: String,
    pub database: PathBuf,
    pub busy_timeout_ms: u64,
}

impl DbSettings {
    /// Derive settings from a loaded store.
    pub fn from_store(store: &ConfigStore) -> Result<Self, DbError> {
        let driver = store
            .get(KEY_CONNECTION)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_DRIVER)
            .to_ascii_lowercase();
        if driver != DEFAULT_DRIVER {
            return Err(DbError::UnsupportedDriver(driver));
        }

        let database = store
            .get(KEY_DATABASE)
            .filter(|v| !v.is_empty())
            .ok_or(DbError::MissingSetting(KEY_DATABASE))?;
        let database = resolve_relative(Path::new(database), store.source());

        let busy_timeout_ms = match store.get(KEY_BUSY_TIMEOUT_MS) {
            None | Some("") => DEFAULT_BUSY_TIMEOUT_MS,
            Some(raw) => raw.parse().map_err(|_| DbError::InvalidSetting {
                key: KEY_BUSY_TIMEOUT_MS,
                value: raw.to_string(),
            })?,
        };

        Ok(DbSettings {
            driver,
            database,
            busy_timeout_ms,
        })
    }

    /// Open the configured database. The file must already exist.
    pub fn open(&self) -> Result<Connection, DbError> {
        if !self.database.is_file() {
            return Err(DbError::DatabaseNotFound(self.database.clone()));
        }

        debug!(path = %self.database.display(), "opening database");
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(&self.database, flags)?;
        connection.execute_batch("PRAGMA foreign_keys = ON;")?;
        connection.busy_timeout(Duration::from_millis(self.busy_timeout_ms))?;
        Ok(connection)
    }
}

/// Relative database paths are taken relative to the env file's directory.
fn resolve_relative(path: &Path, env_file: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env_file.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::parse_str;

    fn store(content: &str, source: Option<&str>) -> ConfigStore {
        ConfigStore::from_entries(parse_str(content), source.map(PathBuf::from))
    }

    #[test]
    fn test_defaults() {
        let settings = DbSettings::from_store(&store("DB_DATABASE=/srv/app.db", None)).unwrap();
        assert_eq!(settings.driver, "sqlite");
        assert_eq!(settings.database, PathBuf::from("/srv/app.db"));
        assert_eq!(settings.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_relative_path_resolves_next_to_env_file() {
        let settings = DbSettings::from_store(&store(
            "DB_DATABASE=storage/app.db",
            Some("/srv/project/.env"),
        ))
        .unwrap();
        assert_eq!(settings.database, PathBuf::from("/srv/project/storage/app.db"));
    }

    #[test]
    fn test_driver_is_case_insensitive() {
        let settings =
            DbSettings::from_store(&store("DB_CONNECTION=SQLite\nDB_DATABASE=/a.db", None))
                .unwrap();
        assert_eq!(settings.driver, "sqlite");
    }

    #[test]
    fn test_unsupported_driver() {
        let err = DbSettings::from_store(&store("DB_CONNECTION=mysql\nDB_DATABASE=app", None))
            .unwrap_err();
        assert!(matches!(err, DbError::UnsupportedDriver(d) if d == "mysql"));
    }

    #[test]
    fn test_missing_database() {
        let err = DbSettings::from_store(&store("DB_DATABASE=", None)).unwrap_err();
        assert!(matches!(err, DbError::MissingSetting(KEY_DATABASE)));
    }

    #[test]
    fn test_invalid_busy_timeout() {
        let err = DbSettings::from_store(&store(
            "DB_DATABASE=/a.db\nDB_BUSY_TIMEOUT_MS=soon",
            None,
        ))
        .unwrap_err();
        assert!(matches!(err, DbError::InvalidSetting { key: KEY_BUSY_TIMEOUT_MS, .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = DbSettings {
            driver: "sqlite".into(),
            database: dir.path().join("absent.db"),
            busy_timeout_ms: 100,
        };
        assert!(matches!(settings.open(), Err(DbError::DatabaseNotFound(_))));
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn test_open_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE t (x INTEGER);")
            .unwrap();

        let settings = DbSettings {
            driver: "sqlite".into(),
            database: path,
            busy_timeout_ms: 100,
        };
        let conn = settings.open().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }
}
