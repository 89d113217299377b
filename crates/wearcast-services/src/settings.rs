//! User settings: a singleton document of notification, weather-alert and
//! clothing thresholds.
//!
//! The default settings exist only in code until the user changes something;
//! first read of an empty store returns them without persisting.

use serde::{Deserialize, Serialize};

use wearcast_store::{events, DocStore, Document, StoreContext};

use crate::notifications::NotificationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    pub enabled: bool,
    /// Daily digest time, `HH:mm`.
    pub time: String,
    #[serde(rename = "types")]
    pub kinds: Vec<NotificationKind>,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            enabled: true,
            time: "07:00".to_string(),
            kinds: vec![
                NotificationKind::Weather,
                NotificationKind::Plan,
                NotificationKind::Clothing,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureAlerts {
    pub low: i32,
    pub high: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPrefs {
    pub temperature_unit: TemperatureUnit,
    /// Rain-probability percentage above which an alert fires.
    pub rain_threshold: u32,
    pub temperature_alerts: TemperatureAlerts,
}

impl Default for WeatherPrefs {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Celsius,
            rain_threshold: 50,
            temperature_alerts: TemperatureAlerts { low: 10, high: 30 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingPrefs {
    /// Below this temperature the wardrobe leans warm.
    pub cold_weather: i32,
    /// Above this temperature the wardrobe leans light.
    pub hot_weather: i32,
    pub rain_protection: bool,
}

impl Default for ClothingPrefs {
    fn default() -> Self {
        Self { cold_weather: 10, hot_weather: 30, rain_protection: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub notifications: NotificationPrefs,
    #[serde(default, rename = "weatherPreferences")]
    pub weather: WeatherPrefs,
    #[serde(default, rename = "clothingPreferences")]
    pub clothing: ClothingPrefs,
}

impl Document for UserSettings {
    const KEY: &'static str = "wearcast-settings";
    const EVENT: &'static str = events::SETTINGS_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self::default()
    }
}

pub struct SettingsRepository {
    docs: DocStore<UserSettings>,
}

impl SettingsRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    pub fn load(&self) -> UserSettings {
        self.docs.load()
    }

    pub fn save(&self, settings: &UserSettings) {
        self.docs.save(settings);
    }

    /// Load, mutate, save. Returns the stored value.
    pub fn update<F>(&self, apply: F) -> UserSettings
    where
        F: FnOnce(&mut UserSettings),
    {
        let mut settings = self.docs.load();
        apply(&mut settings);
        self.docs.save(&settings);
        settings
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_defaults_match_first_run_behavior() {
        let settings = UserSettings::default();
        assert!(settings.notifications.enabled);
        assert_eq!(settings.notifications.time, "07:00");
        assert_eq!(settings.notifications.kinds.len(), 3);
        assert_eq!(settings.weather.rain_threshold, 50);
        assert_eq!(settings.weather.temperature_alerts.low, 10);
        assert_eq!(settings.weather.temperature_alerts.high, 30);
        assert_eq!(settings.clothing.cold_weather, 10);
        assert_eq!(settings.clothing.hot_weather, 30);
        assert!(settings.clothing.rain_protection);
    }

    #[test]
    fn test_first_read_does_not_persist_the_default() {
        let ctx = StoreContext::in_memory();
        let repo = SettingsRepository::new(ctx.clone());

        assert_eq!(repo.load(), UserSettings::default());
        assert!(ctx.kv.get("wearcast-settings").is_none());
    }

    #[test]
    fn test_update_persists_and_roundtrips() {
        let repo = SettingsRepository::new(StoreContext::in_memory());

        let stored = repo.update(|s| {
            s.notifications.enabled = false;
            s.weather.temperature_alerts.high = 35;
        });
        assert!(!stored.notifications.enabled);

        let reloaded = repo.load();
        assert!(!reloaded.notifications.enabled);
        assert_eq!(reloaded.weather.temperature_alerts.high, 35);
        // Untouched sections keep their defaults.
        assert_eq!(reloaded.clothing, ClothingPrefs::default());
    }

    #[test]
    fn test_garbage_entry_yields_defaults() {
        let ctx = StoreContext::in_memory();
        ctx.kv.set("wearcast-settings", "{not json").unwrap();

        let repo = SettingsRepository::new(ctx);
        assert_eq!(repo.load(), UserSettings::default());
    }

    #[test]
    fn test_partial_document_fills_missing_sections() {
        let ctx = StoreContext::in_memory();
        // A settings document from a build that only knew notifications.
        let legacy = serde_json::json!({
            "notifications": { "enabled": false, "time": "08:00", "types": ["weather"] }
        });
        ctx.kv.set("wearcast-settings", &legacy.to_string()).unwrap();

        let repo = SettingsRepository::new(ctx);
        let settings = repo.load();
        assert!(!settings.notifications.enabled);
        assert_eq!(settings.weather, WeatherPrefs::default());
    }
}
