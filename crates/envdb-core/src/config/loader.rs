//! Env loader: reads a `.env` file once per process and answers lookups.
//!
//! # Resolution
//! 1. Explicit path passed to [`Loader::load`]
//! 2. `.env` in the project root, two levels above the directory holding
//!    the running binary (`<root>/target/<profile>/envdb` → `<root>/.env`)
//! 3. `.env` in the current directory when the binary location is unknown
//!
//! The first successful load wins. Later loads, with any path, return the
//! already-populated store untouched.

use std::path::{Path, PathBuf};

use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, info};

use super::env_sink::{EnvSink, ProcessEnv};
use super::parser::parse_str;
use super::store::ConfigStore;
use crate::error::ConfigError;

/// File name looked up in the project root.
pub const ENV_FILE_NAME: &str = ".env";

/// Template operators copy to create [`ENV_FILE_NAME`].
pub const TEMPLATE_FILE_NAME: &str = ".env.example";

/// Default env file path.
pub fn default_env_path() -> PathBuf {
    project_root().join(ENV_FILE_NAME)
}

fn project_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.ancestors().nth(3).map(Path::to_path_buf))
        .filter(|root| !root.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Read and parse one env file, mirroring every pair into `sink`.
///
/// No load-once guard here; see [`Loader`] for that.
pub fn read_env_file(path: &Path, sink: &dyn EnvSink) -> Result<ConfigStore, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "reading env file");

    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let entries = parse_str(&content);
    for entry in &entries {
        sink.set(&entry.key, &entry.value);
    }

    let store = ConfigStore::from_entries(entries, Some(path.to_path_buf()));
    info!(path = %path.display(), keys = store.len(), "env file loaded");
    Ok(store)
}

// ─────────────────────────────────────────────
// Loader
// ─────────────────────────────────────────────

/// Load-once wrapper around [`read_env_file`].
///
/// Safe to share across threads: concurrent first calls run the file read
/// at most once, and reads after that take no lock. A failed load leaves
/// the loader empty.
pub struct Loader {
    store: OnceCell<ConfigStore>,
    sink: Box<dyn EnvSink>,
    /// Used when `load` gets no path; `None` means [`default_env_path`].
    default_path: Option<PathBuf>,
}

impl Loader {
    /// Create an empty loader that mirrors values into `sink`.
    pub fn new(sink: impl EnvSink + 'static) -> Self {
        Loader {
            store: OnceCell::new(),
            sink: Box::new(sink),
            default_path: None,
        }
    }

    /// Like [`Loader::new`], but path-less loads read `default_path`.
    pub fn with_default_path(
        sink: impl EnvSink + 'static,
        default_path: impl Into<PathBuf>,
    ) -> Self {
        Loader {
            default_path: Some(default_path.into()),
            ..Self::new(sink)
        }
    }

    /// Create an empty loader that exports values to the process environment.
    pub fn with_process_env() -> Self {
        Self::new(ProcessEnv)
    }

    /// Populate the store from `path` (or the default path) unless already loaded.
    pub fn load(&self, path: Option<&Path>) -> Result<&ConfigStore, ConfigError> {
        if let Some(store) = self.store.get() {
            if let Some(requested) = path {
                debug!(path = %requested.display(), "env already loaded, ignoring path");
            }
            return Ok(store);
        }

        self.store.get_or_try_init(|| {
            let path = path
                .map(PathBuf::from)
                .or_else(|| self.default_path.clone())
                .unwrap_or_else(default_env_path);
            read_env_file(&path, self.sink.as_ref())
        })
    }

    /// Look up `key`, loading the default env file first if needed.
    ///
    /// Errors only come from that implicit load.
    pub fn get(&self, key: &str, default: Option<&str>) -> Result<Option<String>, ConfigError> {
        let store = self.load(None)?;
        Ok(store.get_or(key, default).map(str::to_string))
    }

    pub fn is_loaded(&self) -> bool {
        self.store.get().is_some()
    }

    /// The populated store, if loaded.
    pub fn store(&self) -> Option<&ConfigStore> {
        self.store.get()
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

// ─────────────────────────────────────────────
// Process-wide loader
// ─────────────────────────────────────────────

static GLOBAL: Lazy<Loader> = Lazy::new(Loader::with_process_env);

/// Load the process-wide store. See [`Loader::load`].
pub fn load(path: Option<&Path>) -> Result<&'static ConfigStore, ConfigError> {
    GLOBAL.load(path)
}

/// Look up a key in the process-wide store. See [`Loader::get`].
pub fn get(key: &str, default: Option<&str>) -> Result<Option<String>, ConfigError> {
    GLOBAL.get(key, default)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
