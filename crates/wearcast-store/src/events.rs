//! Event-name vocabulary for the change notifier.
//!
//! One name per mutable entity. Publishers and subscribers must use these
//! constants: the notifier matches names exactly, so a free-typed string that
//! drifts from this list creates a channel nobody listens on.

pub const PLANS_UPDATED: &str = "plans-updated";
pub const SETTINGS_UPDATED: &str = "settings-updated";
pub const AUTH_UPDATED: &str = "auth-updated";
pub const NOTIFICATIONS_UPDATED: &str = "notifications-updated";
pub const CLOTHING_RULES_UPDATED: &str = "clothing-rules-updated";
pub const CLOTHING_HISTORY_UPDATED: &str = "clothing-history-updated";
pub const PREFERENCES_UPDATED: &str = "preferences-updated";
pub const BEHAVIOR_UPDATED: &str = "behavior-updated";
pub const NEWS_PREFERENCES_UPDATED: &str = "news-preferences-updated";
pub const LOCATIONS_UPDATED: &str = "locations-updated";
pub const LOCATION_PREFERENCES_UPDATED: &str = "location-preferences-updated";
