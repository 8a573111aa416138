//! Env file configuration: parsing, the load-once store, and env mirroring.
//!
//! # Usage
//! ```no_run
//! use envdb_core::config;
//!
//! let store = config::load(None)?;
//! let db = store.get_or("DB_DATABASE", Some("app.db"));
//! let port = config::get("APP_PORT", Some("8080"))?;
//! # Ok::<(), envdb_core::error::ConfigError>(())
//! ```

pub mod env_sink;
pub mod loader;
pub mod parser;
pub mod store;

// Re-export key types
pub use env_sink::{EnvSink, NoopEnv, ProcessEnv, RecordingEnv};
pub use loader::{
    default_env_path, get, load, read_env_file, Loader, ENV_FILE_NAME, TEMPLATE_FILE_NAME,
};
pub use store::ConfigStore;
