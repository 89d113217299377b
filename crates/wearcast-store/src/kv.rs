//! The key/value persistence port and its two built-in stores.
//!
//! `FileStore` is the durable store used by the application; `MemoryStore`
//! backs tests and can emulate a capacity-limited host.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;

/// Errors raised by a store write. Reads never fail; an unreadable entry is
/// reported as absent.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store capacity exceeded: {attempted} bytes over a {limit} byte limit")]
    CapacityExceeded { attempted: usize, limit: usize },
}

/// Origin-scoped durable key/value storage.
///
/// Writes to the same key are last-write-wins; there is no transactionality
/// across keys. Callers are expected to catch and log a failed `set` rather
/// than propagate it: the in-memory value they hold stays authoritative for
/// the rest of the session.
pub trait KeyValueStore: Send + Sync {
    /// Raw payload stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Durably associate `value` with `key`, replacing any previous payload.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store.
///
/// With [`MemoryStore::with_capacity`] the store rejects writes once the
/// total payload size would exceed the limit, which is how tests exercise a
/// full host quota.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that fails writes pushing total payload bytes past `limit`.
    pub fn with_capacity(limit: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: Some(limit),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        if let Some(limit) = self.capacity {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let attempted = others + value.len();
            if attempted > limit {
                return Err(StoreError::CapacityExceeded { attempted, limit });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one file per key under a data directory.
///
/// Writes go through a temporary file and a rename so a crash mid-write
/// leaves the previous payload intact.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed application identifiers, but sanitize anyway so a
        // stray separator cannot escape the data directory.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
