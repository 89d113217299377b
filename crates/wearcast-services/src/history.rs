//! Clothing history and user preferences.
//!
//! What the user actually wore, with a rating, feeds future recommendations;
//! free-form preferences ("prefers muted colors") ride along as adapter
//! input. Both are append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wearcast_store::{events, timestamp_id, DocStore, Document, StoreContext};

/// A worn outfit, one list per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Outfit {
    pub top: Vec<String>,
    pub bottom: Vec<String>,
    pub shoes: Vec<String>,
    pub accessories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingRecord {
    pub id: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub temperature: i32,
    pub weather: String,
    pub scene: String,
    pub outfit: Outfit,
    /// 1-5.
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields supplied when the user logs an outfit; id is generated on save.
#[derive(Debug, Clone)]
pub struct ClothingRecordDraft {
    pub date: String,
    pub temperature: i32,
    pub weather: String,
    pub scene: String,
    pub outfit: Outfit,
    pub rating: u8,
    pub notes: Option<String>,
}

/// Newtype wrapper so [`Document`] can be implemented for the history list
/// without violating the orphan rule (`Document` and `Vec` are both foreign
/// to this crate). Serializes identically to `Vec<ClothingRecord>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct ClothingHistory(Vec<ClothingRecord>);

impl Document for ClothingHistory {
    const KEY: &'static str = "wearcast-clothing-history";
    const EVENT: &'static str = events::CLOTHING_HISTORY_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self(Vec::new())
    }
}

pub struct ClothingHistoryRepository {
    docs: DocStore<ClothingHistory>,
}

impl ClothingHistoryRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    /// Records in insertion order, oldest first.
    pub fn list(&self) -> Vec<ClothingRecord> {
        self.docs.load().0
    }

    /// Append a record and return it with its generated id.
    pub fn record(&self, draft: ClothingRecordDraft, now: DateTime<Utc>) -> ClothingRecord {
        let record = ClothingRecord {
            id: timestamp_id(now),
            date: draft.date,
            temperature: draft.temperature,
            weather: draft.weather,
            scene: draft.scene,
            outfit: draft.outfit,
            rating: draft.rating.clamp(1, 5),
            notes: draft.notes,
        };

        let mut history = self.docs.load();
        history.0.push(record.clone());
        self.docs.save(&history);
        record
    }

    /// First garment of each recorded top, the condensed shape the
    /// recommendation adapter takes as history.
    pub fn recent_tops(&self) -> Vec<String> {
        self.docs
            .load()
            .0
            .into_iter()
            .filter_map(|r| r.outfit.top.into_iter().next())
            .collect()
    }
}

/// A free-form user preference the recommendation adapter can see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub id: String,
    pub name: String,
    pub value: String,
}

/// Newtype wrapper so [`Document`] can be implemented for the preference
/// list without violating the orphan rule (`Document` and `Vec` are both
/// foreign to this crate). Serializes identically to `Vec<Preference>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct PreferenceList(Vec<Preference>);

impl Document for PreferenceList {
    const KEY: &'static str = "wearcast-preferences";
    const EVENT: &'static str = events::PREFERENCES_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self(Vec::new())
    }
}

pub struct PreferenceRepository {
    docs: DocStore<PreferenceList>,
}

impl PreferenceRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    pub fn list(&self) -> Vec<Preference> {
        self.docs.load().0
    }

    pub fn add(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Preference {
        let preference =
            Preference { id: timestamp_id(now), name: name.into(), value: value.into() };
        let mut preferences = self.docs.load();
        preferences.0.push(preference.clone());
        self.docs.save(&preferences);
        preference
    }

    /// Just the names, the shape the recommendation prompt wants.
    pub fn names(&self) -> Vec<String> {
        self.docs.load().0.into_iter().map(|p| p.name).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn outfit(top: &str) -> Outfit {
        Outfit { top: vec![top.to_string()], ..Outfit::default() }
    }

    fn record_draft(top: &str, rating: u8) -> ClothingRecordDraft {
        ClothingRecordDraft {
            date: "2024-03-20".to_string(),
            temperature: 18,
            weather: "晴".to_string(),
            scene: "work".to_string(),
            outfit: outfit(top),
            rating,
            notes: None,
        }
    }

    #[test]
    fn test_records_append_in_order() {
        let repo = ClothingHistoryRepository::new(StoreContext::in_memory());
        let now = Utc::now();

        repo.record(record_draft("oxford shirt", 4), now);
        repo.record(record_draft("navy blazer", 5), now);

        let history = repo.list();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].outfit.top, vec!["oxford shirt"]);
        assert_eq!(history[1].outfit.top, vec!["navy blazer"]);
    }

    #[test]
    fn test_rating_is_clamped_to_scale() {
        let repo = ClothingHistoryRepository::new(StoreContext::in_memory());
        let record = repo.record(record_draft("tee", 9), Utc::now());
        assert_eq!(record.rating, 5);

        let record = repo.record(record_draft("tee", 0), Utc::now());
        assert_eq!(record.rating, 1);
    }

    #[test]
    fn test_recent_tops_condenses_history() {
        let repo = ClothingHistoryRepository::new(StoreContext::in_memory());
        let now = Utc::now();
        repo.record(record_draft("oxford shirt", 4), now);
        repo.record(
            ClothingRecordDraft { outfit: Outfit::default(), ..record_draft("", 3) },
            now,
        );
        repo.record(record_draft("navy blazer", 5), now);

        // Records with no top recorded are skipped, not empty strings.
        assert_eq!(repo.recent_tops(), vec!["oxford shirt", "navy blazer"]);
    }

    #[test]
    fn test_preferences_roundtrip() {
        let repo = PreferenceRepository::new(StoreContext::in_memory());
        let now = Utc::now();

        repo.add("muted colors", "likes", now);
        repo.add("no wool", "dislikes", now);

        assert_eq!(repo.names(), vec!["muted colors", "no wool"]);
        assert_eq!(repo.list().len(), 2);
    }

    #[test]
    fn test_garbage_history_yields_empty() {
        let ctx = StoreContext::in_memory();
        ctx.kv.set("wearcast-clothing-history", "{not json").unwrap();
        let repo = ClothingHistoryRepository::new(ctx);
        assert!(repo.list().is_empty());
    }
}
