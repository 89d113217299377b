//! Threshold checks that turn current conditions into notification drafts.
//!
//! Pure: the caller feeds each draft to the notification repository itself.
//! A view that both writes a plan and raises an alert performs two
//! independent writes; one can fail while the other lands, and nothing rolls
//! back.

use wearcast_weather::{is_rainy, LiveConditions};

use crate::notifications::NotificationKind;
use crate::settings::UserSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDraft {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Evaluate the user's thresholds against current conditions.
///
/// Returns nothing when notifications are disabled or a condition's kind is
/// filtered out in the settings.
pub fn evaluate_alerts(settings: &UserSettings, conditions: &LiveConditions) -> Vec<AlertDraft> {
    if !settings.notifications.enabled {
        return Vec::new();
    }

    let mut drafts = Vec::new();
    let wants = |kind: NotificationKind| settings.notifications.kinds.contains(&kind);
    let alerts = &settings.weather.temperature_alerts;

    if wants(NotificationKind::Weather) && conditions.temperature <= alerts.low {
        drafts.push(AlertDraft {
            kind: NotificationKind::Weather,
            title: "Low temperature alert".to_string(),
            message: format!(
                "{} is at {}°C, at or below your {}°C threshold",
                conditions.city, conditions.temperature, alerts.low
            ),
        });
    }

    if wants(NotificationKind::Weather) && conditions.temperature >= alerts.high {
        drafts.push(AlertDraft {
            kind: NotificationKind::Weather,
            title: "High temperature alert".to_string(),
            message: format!(
                "{} is at {}°C, at or above your {}°C threshold",
                conditions.city, conditions.temperature, alerts.high
            ),
        });
    }

    if wants(NotificationKind::Clothing)
        && settings.clothing.rain_protection
        && is_rainy(&conditions.weather)
    {
        drafts.push(AlertDraft {
            kind: NotificationKind::Clothing,
            title: "Rain gear reminder".to_string(),
            message: format!("{} expected; pack an umbrella or rain jacket", conditions.weather),
        });
    }

    drafts
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn conditions(temperature: i32, weather: &str) -> LiveConditions {
        LiveConditions {
            temperature,
            humidity: 60,
            weather: weather.to_string(),
            wind_direction: "SE".to_string(),
            wind_power: "≤3".to_string(),
            report_time: "2024-03-20 07:30:00".to_string(),
            city: "仙居县".to_string(),
        }
    }

    #[test]
    fn test_mild_clear_day_raises_nothing() {
        let drafts = evaluate_alerts(&UserSettings::default(), &conditions(20, "晴"));
        assert!(drafts.is_empty());
    }

    #[test]
    fn test_cold_day_raises_low_temperature_alert() {
        let drafts = evaluate_alerts(&UserSettings::default(), &conditions(3, "晴"));
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].kind, NotificationKind::Weather);
        assert!(drafts[0].message.contains("3°C"));
    }

    #[test]
    fn test_rainy_day_raises_rain_gear_reminder() {
        let drafts = evaluate_alerts(&UserSettings::default(), &conditions(20, "小雨"));
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].kind, NotificationKind::Clothing);
    }

    #[test]
    fn test_cold_rain_raises_both() {
        let drafts = evaluate_alerts(&UserSettings::default(), &conditions(2, "中雨"));
        assert_eq!(drafts.len(), 2);
    }

    #[test]
    fn test_disabled_notifications_mute_everything() {
        let mut settings = UserSettings::default();
        settings.notifications.enabled = false;
        let drafts = evaluate_alerts(&settings, &conditions(-10, "暴雨"));
        assert!(drafts.is_empty());
    }

    #[test]
    fn test_kind_filter_is_respected() {
        let mut settings = UserSettings::default();
        settings.notifications.kinds = vec![NotificationKind::Plan];
        let drafts = evaluate_alerts(&settings, &conditions(-10, "暴雨"));
        assert!(drafts.is_empty());
    }

    #[test]
    fn test_rain_protection_off_skips_rain_reminder() {
        let mut settings = UserSettings::default();
        settings.clothing.rain_protection = false;
        let drafts = evaluate_alerts(&settings, &conditions(20, "小雨"));
        assert!(drafts.is_empty());
    }
}
