//! Weather-aware news digest and relevance ranking.
//!
//! The digest items are generated from current conditions; ranking is a
//! linear re-score by the user's category weights and interest profile.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wearcast_store::{events, DocStore, Document, StoreContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Weather,
    Fashion,
    Lifestyle,
    Health,
}

impl NewsCategory {
    pub fn name(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Fashion => "fashion",
            Self::Lifestyle => "lifestyle",
            Self::Health => "health",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: NewsCategory,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub source: String,
    pub published_at: DateTime<Utc>,
    /// Relevance score; starts at the item's own 0-1 estimate and is
    /// re-scored by ranking.
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordWeight {
    pub word: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPreferences {
    pub categories: Vec<CategoryWeight>,
    pub keywords: Vec<KeywordWeight>,
    /// Refresh cadence in minutes.
    pub update_frequency: u32,
}

impl Default for NewsPreferences {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryWeight { name: "weather".to_string(), weight: 1.0 },
                CategoryWeight { name: "fashion".to_string(), weight: 0.8 },
                CategoryWeight { name: "lifestyle".to_string(), weight: 0.6 },
                CategoryWeight { name: "health".to_string(), weight: 0.7 },
            ],
            keywords: Vec::new(),
            update_frequency: 30,
        }
    }
}

impl Document for NewsPreferences {
    const KEY: &'static str = "wearcast-news-preferences";
    const EVENT: &'static str = events::NEWS_PREFERENCES_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self::default()
    }
}

pub struct NewsPreferencesRepository {
    docs: DocStore<NewsPreferences>,
}

impl NewsPreferencesRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    pub fn load(&self) -> NewsPreferences {
        self.docs.load()
    }

    pub fn save(&self, preferences: &NewsPreferences) {
        self.docs.save(preferences);
    }
}

/// The two digest items derived from current conditions.
pub fn weather_digest(temperature: i32, weather: &str, now: DateTime<Utc>) -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: "digest-outfit".to_string(),
            title: format!("What to wear in {weather} weather"),
            content: format!(
                "It's {temperature}°C and {weather} today; dress for comfort and breathability."
            ),
            category: NewsCategory::Fashion,
            tags: vec!["outfit".to_string(), weather.to_string()],
            image_url: None,
            source: "Wardrobe desk".to_string(),
            published_at: now,
            relevance: 0.9,
        },
        NewsItem {
            id: "digest-weather".to_string(),
            title: "Conditions update".to_string(),
            content: format!(
                "It's {temperature}°C and {weather} today; plan outdoor time accordingly."
            ),
            category: NewsCategory::Weather,
            tags: vec!["weather".to_string(), "outings".to_string()],
            image_url: None,
            source: "Weather desk".to_string(),
            published_at: now,
            relevance: 0.8,
        },
    ]
}

/// Re-score and sort items: relevance × category weight, plus a tenth of the
/// interest weight for each matching tag, descending.
pub fn rank_news(
    items: Vec<NewsItem>,
    interests: &HashMap<String, f64>,
    preferences: &NewsPreferences,
) -> Vec<NewsItem> {
    let mut scored: Vec<NewsItem> = items
        .into_iter()
        .map(|mut item| {
            let mut score = item.relevance;
            if let Some(pref) =
                preferences.categories.iter().find(|c| c.name == item.category.name())
            {
                score *= pref.weight;
            }
            for tag in &item.tags {
                if let Some(weight) = interests.get(tag) {
                    score += weight * 0.1;
                }
            }
            item.relevance = score;
            item
        })
        .collect();

    scored.sort_by(|a, b| {
        b.relevance.partial_cmp(&a.relevance).unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}
