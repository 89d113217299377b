//! In-app notification center.
//!
//! Newest-first, append-only list; `read` flips one way and the only removal
//! is a bulk clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wearcast_store::{events, timestamp_id, DocStore, Document, StoreContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Weather,
    Plan,
    Clothing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Newtype wrapper so [`Document`] can be implemented for the notification
/// list without violating the orphan rule (`Document` and `Vec` are both
/// foreign to this crate). Serializes identically to `Vec<Notification>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct NotificationList(Vec<Notification>);

impl Document for NotificationList {
    const KEY: &'static str = "wearcast-notifications";
    const EVENT: &'static str = events::NOTIFICATIONS_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self(Vec::new())
    }
}

pub struct NotificationRepository {
    docs: DocStore<NotificationList>,
}

impl NotificationRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    /// All notifications, newest first.
    pub fn list(&self) -> Vec<Notification> {
        self.docs.load().0
    }

    /// Prepend an unread notification and return it. The returned value is
    /// the caller's truth even if the durable write fails.
    pub fn add(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification {
            id: timestamp_id(now),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp: now,
            read: false,
        };

        let mut notifications = self.docs.load();
        notifications.0.insert(0, notification.clone());
        self.docs.save(&notifications);
        notification
    }

    /// Flip `read` to true. Returns whether anything changed; marking an
    /// already-read or unknown notification is a no-op with no publish.
    pub fn mark_read(&self, id: &str) -> bool {
        let mut notifications = self.docs.load();
        let Some(notification) = notifications.0.iter_mut().find(|n| n.id == id && !n.read) else {
            return false;
        };
        notification.read = true;
        self.docs.save(&notifications);
        true
    }

    /// Bulk clear, the only removal the notification center supports.
    pub fn clear(&self) {
        self.docs.save(&NotificationList::default());
    }

    pub fn unread_count(&self) -> usize {
        self.docs.load().0.iter().filter(|n| !n.read).count()
    }
}
