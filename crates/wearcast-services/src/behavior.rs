//! Behavior log and interest analysis.
//!
//! Every view/search/click/share lands in an append-only log; the only
//! consumer is the weighted interest profile that biases news ranking.
//! Nothing is ever deleted and there is no retention policy; unbounded
//! growth is an accepted limitation of the log.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wearcast_store::{events, timestamp_id, DocStore, Document, StoreContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorKind {
    View,
    Search,
    Click,
    Share,
}

impl BehaviorKind {
    /// Weight of one occurrence in the interest profile.
    pub fn weight(self) -> f64 {
        match self {
            Self::View => 1.0,
            Self::Search => 2.0,
            Self::Click => 1.5,
            Self::Share => 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BehaviorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Dwell time in seconds, when the surface measures it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// Newtype wrapper so [`Document`] can be implemented for the event log
/// without violating the orphan rule (`Document` and `Vec` are both foreign
/// to this crate). Serializes identically to `Vec<BehaviorEvent>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct BehaviorLog(Vec<BehaviorEvent>);

impl Document for BehaviorLog {
    const KEY: &'static str = "wearcast-behavior";
    const EVENT: &'static str = events::BEHAVIOR_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self(Vec::new())
    }
}

pub struct BehaviorRepository {
    docs: DocStore<BehaviorLog>,
}

impl BehaviorRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    pub fn list(&self) -> Vec<BehaviorEvent> {
        self.docs.load().0
    }

    /// Append one behavior event.
    pub fn track(
        &self,
        kind: BehaviorKind,
        keyword: Option<String>,
        category: Option<String>,
        now: DateTime<Utc>,
    ) -> BehaviorEvent {
        let event = BehaviorEvent {
            id: timestamp_id(now),
            kind,
            keyword,
            category,
            timestamp: now,
            duration: None,
        };
        let mut log = self.docs.load();
        log.0.push(event.clone());
        self.docs.save(&log);
        event
    }

    /// Weighted interest profile over the whole log.
    pub fn interests(&self) -> HashMap<String, f64> {
        analyze_interests(&self.docs.load().0)
    }
}

/// Sum each event's weight into its keyword and its category.
pub fn analyze_interests(events: &[BehaviorEvent]) -> HashMap<String, f64> {
    let mut interests = HashMap::new();
    for event in events {
        let weight = event.kind.weight();
        if let Some(ref keyword) = event.keyword {
            *interests.entry(keyword.clone()).or_insert(0.0) += weight;
        }
        if let Some(ref category) = event.category {
            *interests.entry(category.clone()).or_insert(0.0) += weight;
        }
    }
    interests
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_track_appends_to_the_log() {
        let repo = BehaviorRepository::new(StoreContext::in_memory());
        let now = Utc::now();

        repo.track(BehaviorKind::View, Some("scarves".to_string()), None, now);
        repo.track(BehaviorKind::Search, None, Some("fashion".to_string()), now);

        assert_eq!(repo.list().len(), 2);
    }

    #[test]
    fn test_interest_weights_accumulate() {
        let repo = BehaviorRepository::new(StoreContext::in_memory());
        let now = Utc::now();

        repo.track(BehaviorKind::View, Some("scarves".to_string()), None, now);
        repo.track(BehaviorKind::Share, Some("scarves".to_string()), None, now);
        repo.track(
            BehaviorKind::Click,
            Some("boots".to_string()),
            Some("fashion".to_string()),
            now,
        );

        let interests = repo.interests();
        assert_eq!(interests.get("scarves"), Some(&4.0)); // view 1.0 + share 3.0
        assert_eq!(interests.get("boots"), Some(&1.5));
        assert_eq!(interests.get("fashion"), Some(&1.5));
    }

    #[test]
    fn test_event_without_keyword_or_category_contributes_nothing() {
        let events = vec![BehaviorEvent {
            id: "1".to_string(),
            kind: BehaviorKind::Share,
            keyword: None,
            category: None,
            timestamp: Utc::now(),
            duration: None,
        }];
        assert!(analyze_interests(&events).is_empty());
    }
}
