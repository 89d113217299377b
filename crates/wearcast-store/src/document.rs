//! Versioned JSON documents over the key/value port.
//!
//! Each persisted entity implements [`Document`]: a fixed key, a change
//! event, a schema version, and a static default. [`DocStore`] handles the
//! envelope, migration of older payloads, and the write-then-publish
//! ordering every repository relies on.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::StoreContext;

/// A persisted document bound to one store key and one change event.
pub trait Document: Serialize + DeserializeOwned {
    /// Store key. Stable across versions; changing it silently orphans old
    /// data, so schema changes bump [`Document::VERSION`] instead.
    const KEY: &'static str;

    /// Event published after every save.
    const EVENT: &'static str;

    /// Schema version written by `save`.
    const VERSION: u32;

    /// Value handed to callers when the key is absent or unreadable.
    fn default_value() -> Self;

    /// Upgrade a payload written at schema version `from` to the current
    /// shape. Payloads stored before the envelope existed are passed in as
    /// version 1. Returning `None` discards the payload in favor of the
    /// default.
    fn migrate(from: u32, data: Value) -> Option<Value> {
        let _ = from;
        Some(data)
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    data: Value,
}

/// Typed access to one document in the store.
pub struct DocStore<T: Document> {
    ctx: StoreContext,
    _marker: PhantomData<T>,
}

impl<T: Document> DocStore<T> {
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx, _marker: PhantomData }
    }

    pub fn context(&self) -> &StoreContext {
        &self.ctx
    }

    /// Deserialize the document under [`Document::KEY`].
    ///
    /// Absent key, corrupt JSON, or a failed migration all fall back to
    /// [`Document::default_value`]; callers always receive a usable value.
    /// The default is not written back; persistence starts with the first
    /// change.
    pub fn load(&self) -> T {
        let Some(raw) = self.ctx.kv.get(T::KEY) else {
            return T::default_value();
        };
        match Self::decode(&raw) {
            Some(value) => value,
            None => {
                tracing::warn!(key = T::KEY, "unreadable document, using default");
                T::default_value()
            }
        }
    }

    fn decode(raw: &str) -> Option<T> {
        let parsed: Value = serde_json::from_str(raw).ok()?;
        let (version, data) = match serde_json::from_value::<Envelope>(parsed.clone()) {
            Ok(envelope) => (envelope.version, envelope.data),
            // Payloads predating the envelope count as version 1.
            Err(_) => (1, parsed),
        };
        let data = if version < T::VERSION {
            tracing::debug!(key = T::KEY, from = version, to = T::VERSION, "migrating document");
            T::migrate(version, data)?
        } else {
            data
        };
        serde_json::from_value(data).ok()
    }

    /// Serialize and write the document, then publish [`Document::EVENT`].
    ///
    /// The publish always follows the write attempt. A failed write is
    /// logged and the event still fires: the value the caller holds remains
    /// the session's truth even if the durable copy is stale.
    pub fn save(&self, value: &T) {
        match serde_json::to_value(value) {
            Ok(data) => {
                let envelope = Envelope { version: T::VERSION, data };
                match serde_json::to_string(&envelope) {
                    Ok(raw) => {
                        if let Err(e) = self.ctx.kv.set(T::KEY, &raw) {
                            tracing::error!(
                                key = T::KEY,
                                error = %e,
                                "durable write failed; in-memory state stays authoritative"
                            );
                        }
                    }
                    Err(e) => tracing::error!(key = T::KEY, error = %e, "serialize failed"),
                }
            }
            Err(e) => tracing::error!(key = T::KEY, error = %e, "serialize failed"),
        }
        self.ctx.notifier.publish(T::EVENT);
    }
}
