//! Cross-view change notifier.
//!
//! A process-wide synchronous publish/subscribe channel. A repository
//! publishes its entity's event after writing; any other mounted view
//! subscribed to that event re-loads and re-renders. Handlers run on the
//! publisher's thread, in registration order, and are isolated from one
//! another: a panicking handler is logged and the pass continues.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

type Handler = Arc<dyn Fn() + Send + Sync>;

/// Token returned by [`ChangeNotifier::subscribe`]; pass it back to
/// [`ChangeNotifier::unsubscribe`] at teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

#[derive(Default)]
pub struct ChangeNotifier {
    channels: Mutex<HashMap<String, Vec<(u64, Handler)>>>,
    next_token: AtomicU64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` to run on every publish of `event` until the token
    /// is unsubscribed. Event names are compared exactly; a misspelled name
    /// subscribes to a channel nobody publishes on.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> SubscriptionToken
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.channels
            .lock()
            .entry(event.to_string())
            .or_default()
            .push((id, Arc::new(handler)));
        SubscriptionToken(id)
    }

    /// Invoke every handler registered for `event`, in registration order.
    ///
    /// Two publishes in quick succession are not coalesced; each runs a full
    /// handler pass. Handlers may subscribe or unsubscribe re-entrantly (the
    /// pass uses the registration list as it was when the publish started).
    pub fn publish(&self, event: &str) {
        let handlers: Vec<Handler> = {
            let channels = self.channels.lock();
            channels
                .get(event)
                .map(|subs| subs.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        tracing::trace!(event, handlers = handlers.len(), "publishing change");
        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler())).is_err() {
                tracing::warn!(event, "change handler panicked; remaining handlers still run");
            }
        }
    }

    /// Remove the subscription for `token`. Idempotent: unknown or
    /// already-removed tokens are ignored, so teardown may run twice.
    pub fn unsubscribe(&self, token: SubscriptionToken) {
        let mut channels = self.channels.lock();
        for subs in channels.values_mut() {
            subs.retain(|(id, _)| *id != token.0);
        }
    }
}
