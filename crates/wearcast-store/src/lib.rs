//! Local persisted state for Wearcast.
//!
//! Everything the application remembers lives in a key/value durable store
//! behind the [`KeyValueStore`] port. Typed access goes through [`DocStore`],
//! which wraps each entity's key with versioned JSON documents and a static
//! default, and announces every write on the [`ChangeNotifier`] so that
//! independently mounted views stay consistent without a reload.

pub mod context;
pub mod document;
pub mod events;
pub mod id;
pub mod kv;
pub mod notifier;

pub use context::StoreContext;
pub use document::{DocStore, Document};
pub use id::timestamp_id;
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use notifier::{ChangeNotifier, SubscriptionToken};
