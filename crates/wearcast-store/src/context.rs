//! The capability context injected into every repository.

use std::path::Path;
use std::sync::Arc;

use crate::kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
use crate::notifier::ChangeNotifier;

/// Shared capabilities: the durable store and the change notifier.
///
/// Constructed once at startup and handed to each repository and view, so
/// tests can substitute an in-memory store and observe publishes directly.
/// Cheap to clone.
#[derive(Clone)]
pub struct StoreContext {
    pub kv: Arc<dyn KeyValueStore>,
    pub notifier: Arc<ChangeNotifier>,
}

impl StoreContext {
    pub fn new(kv: Arc<dyn KeyValueStore>, notifier: Arc<ChangeNotifier>) -> Self {
        Self { kv, notifier }
    }

    /// File-backed context rooted at `dir`.
    ///
    /// # Errors
    /// Fails if the data directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        Ok(Self::new(
            Arc::new(FileStore::open(dir)?),
            Arc::new(ChangeNotifier::new()),
        ))
    }

    /// In-memory context (for tests).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(ChangeNotifier::new()))
    }

    /// In-memory context whose store rejects writes beyond `limit` bytes.
    pub fn in_memory_with_capacity(limit: usize) -> Self {
        Self::new(
            Arc::new(MemoryStore::with_capacity(limit)),
            Arc::new(ChangeNotifier::new()),
        )
    }
}
