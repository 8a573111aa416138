//! Where loaded values get mirrored so code reading environment variables
//! sees the same configuration.
//!
//! The loader writes every parsed pair through an [`EnvSink`]. Production
//! code uses [`ProcessEnv`]; tests use [`RecordingEnv`] or [`NoopEnv`] so
//! the real process environment is left alone.

use std::sync::Mutex;

use tracing::warn;

/// Receives every key/value pair the loader stores.
pub trait EnvSink: Send + Sync {
    fn set(&self, key: &str, value: &str);
}

/// Writes into the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSink for ProcessEnv {
    fn set(&self, key: &str, value: &str) {
        // set_var panics on these; the pair stays in the store regardless.
        if key.contains('\0') || value.contains('\0') {
            warn!(key, "not exporting env var containing a NUL byte");
            return;
        }
        std::env::set_var(key, value);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEnv;

impl EnvSink for NoopEnv {
    fn set(&self, _key: &str, _value: &str) {}
}

/// Records writes in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingEnv {
    writes: Mutex<Vec<(String, String)>>,
}

impl RecordingEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all writes so far.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Most recent value written for `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl EnvSink for RecordingEnv {
    fn set(&self, key: &str, value: &str) {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((key.to_string(), value.to_string()));
    }
}

impl<T: EnvSink + ?Sized> EnvSink for std::sync::Arc<T> {
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}
