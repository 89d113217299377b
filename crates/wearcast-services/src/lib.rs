//! Domain repositories.
//!
//! Each repository owns exactly one key in the persisted store, wraps it
//! with typed operations and a static default, and publishes its entity's
//! change event after every write. Repositories never share keys; views
//! coordinate only through the change notifier.

pub mod alerts;
pub mod behavior;
pub mod history;
pub mod locations;
pub mod news;
pub mod notifications;
pub mod plans;
pub mod settings;
pub mod wardrobe;

pub use alerts::{evaluate_alerts, AlertDraft};
pub use behavior::{analyze_interests, BehaviorEvent, BehaviorKind, BehaviorRepository};
pub use history::{
    ClothingHistoryRepository, ClothingRecord, ClothingRecordDraft, Outfit, Preference,
    PreferenceRepository,
};
pub use locations::{
    LocationDraft, LocationPreferences, LocationPreferencesRepository, LocationRepository,
    StoredLocation,
};
pub use news::{
    rank_news, weather_digest, CategoryWeight, KeywordWeight, NewsCategory, NewsItem,
    NewsPreferences, NewsPreferencesRepository,
};
pub use notifications::{Notification, NotificationKind, NotificationRepository};
pub use plans::{Plan, PlanDraft, PlanError, PlanPatch, PlanRepository, PlanType};
pub use settings::{
    ClothingPrefs, NotificationPrefs, SettingsRepository, TemperatureAlerts, TemperatureUnit,
    UserSettings, WeatherPrefs,
};
pub use wardrobe::{
    clothing_suggestions, quick_suggestion, ClothingRule, ClothingRuleRepository,
    OutfitSuggestions,
};
