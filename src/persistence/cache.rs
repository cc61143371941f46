//! Local cache backends: a same-device key/value store holding the
//! serialized shape list.
//!
//! The bridge only ever reads and overwrites a single fixed key. Backends are
//! synchronous; a write completes before the mutating event handler returns.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Key under which the shape list is cached. Not page-scoped.
pub const SHAPES_CACHE_KEY: &str = "sketchboard.shapes";

/// Errors raised by a cache backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache lock poisoned")]
    Poisoned,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key/value store that survives the session.
pub trait LocalCache {
    /// Read the value under `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// In-memory cache for tests and throwaway sessions.
///
/// Clones share the same entries, so a test can keep a handle while the
/// bridge owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed cache: one `<key>.json` file per key inside a directory.
///
/// The directory is created on the first write.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the cache files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl LocalCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(key), value)?;
        Ok(())
    }
}
