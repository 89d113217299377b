//! Plan repository: the personal calendar behind the home and planner views.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use wearcast_store::{events, timestamp_id, DocStore, Document, StoreContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Outdoor,
    Business,
    Sports,
    #[default]
    Other,
}

impl PlanType {
    /// Category label given to plans created before categories existed.
    pub fn category_label(self) -> &'static str {
        match self {
            Self::Outdoor => "outdoor",
            Self::Business => "business",
            Self::Sports => "sports",
            Self::Other => "general",
        }
    }
}

/// A calendar entry. `date` is `YYYY-MM-DD` and `time` is `HH:mm`; both are
/// compared as strings throughout, which sorts correctly for these formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan not found: {0}")]
    NotFound(String),

    #[error("invalid plan: {0}")]
    Invalid(String),
}

/// Fields supplied by the creation form.
#[derive(Debug, Clone)]
pub struct PlanDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub plan_type: PlanType,
    /// Defaults to the plan type's label when omitted.
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

/// Partial update; only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub plan_type: Option<PlanType>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub description: Option<Option<String>>,
}

/// Newtype wrapper so [`Document`] can be implemented for the plan list
/// without violating the orphan rule (`Document` and `Vec` are both foreign
/// to this crate). Serializes identically to `Vec<Plan>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct PlanList(Vec<Plan>);

impl Document for PlanList {
    const KEY: &'static str = "wearcast-plans";
    const EVENT: &'static str = events::PLANS_UPDATED;
    const VERSION: u32 = 2;

    fn default_value() -> Self {
        Self(Vec::new())
    }

    // Version 1 plans predate `category`, `tags` and the audit timestamps.
    // Missing fields are defaulted rather than the plan discarded; the
    // creation instant is recovered from the millisecond-clock id.
    fn migrate(from: u32, mut data: Value) -> Option<Value> {
        if from == 1 {
            let plans = data.as_array_mut()?;
            for plan in plans {
                let obj = plan.as_object_mut()?;
                if !obj.contains_key("category") {
                    let label = serde_json::from_value::<PlanType>(
                        obj.get("type").cloned().unwrap_or(Value::Null),
                    )
                    .unwrap_or_default()
                    .category_label();
                    obj.insert("category".to_string(), Value::String(label.to_string()));
                }
                obj.entry("tags").or_insert_with(|| Value::Array(Vec::new()));
                if !obj.contains_key("createdAt") {
                    let created = obj
                        .get("id")
                        .and_then(Value::as_str)
                        .and_then(|id| id.parse::<i64>().ok())
                        .and_then(DateTime::from_timestamp_millis)
                        .unwrap_or_default();
                    let stamp = Value::String(created.to_rfc3339());
                    obj.insert("createdAt".to_string(), stamp.clone());
                    obj.entry("updatedAt").or_insert(stamp);
                }
            }
        }
        Some(data)
    }
}

pub struct PlanRepository {
    docs: DocStore<PlanList>,
}

impl PlanRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    /// All plans, ascending by `(date, time)`.
    pub fn list(&self) -> Vec<Plan> {
        self.docs.load().0
    }

    /// Create a plan from the form draft.
    ///
    /// # Errors
    /// `Invalid` when the title is blank or date/time are malformed.
    pub fn create(&self, draft: PlanDraft, now: DateTime<Utc>) -> Result<Plan, PlanError> {
        validate_title(&draft.title)?;
        validate_date(&draft.date)?;
        validate_time(&draft.time)?;

        let plan = Plan {
            id: timestamp_id(now),
            title: draft.title,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            plan_type: draft.plan_type,
            category: draft
                .category
                .unwrap_or_else(|| draft.plan_type.category_label().to_string()),
            tags: draft.tags,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };

        let mut plans = self.docs.load();
        plans.0.push(plan.clone());
        self.store(plans);
        tracing::debug!(id = %plan.id, date = %plan.date, "created plan");
        Ok(plan)
    }

    /// Apply a partial update and refresh `updated_at`.
    ///
    /// # Errors
    /// `NotFound` when no plan has this id, `Invalid` on malformed fields.
    pub fn update(&self, id: &str, patch: PlanPatch, now: DateTime<Utc>) -> Result<Plan, PlanError> {
        if let Some(ref title) = patch.title {
            validate_title(title)?;
        }
        if let Some(ref date) = patch.date {
            validate_date(date)?;
        }
        if let Some(ref time) = patch.time {
            validate_time(time)?;
        }

        let mut plans = self.docs.load();
        let plan = plans
            .0
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlanError::NotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            plan.title = title;
        }
        if let Some(date) = patch.date {
            plan.date = date;
        }
        if let Some(time) = patch.time {
            plan.time = time;
        }
        if let Some(location) = patch.location {
            plan.location = location;
        }
        if let Some(plan_type) = patch.plan_type {
            plan.plan_type = plan_type;
        }
        if let Some(category) = patch.category {
            plan.category = category;
        }
        if let Some(tags) = patch.tags {
            plan.tags = tags;
        }
        if let Some(description) = patch.description {
            plan.description = description;
        }
        plan.updated_at = now;

        let updated = plan.clone();
        self.store(plans);
        tracing::debug!(id = %updated.id, "updated plan");
        Ok(updated)
    }

    /// Remove a plan. Terminal: there is no archived state.
    ///
    /// # Errors
    /// `NotFound` when no plan has this id.
    pub fn delete(&self, id: &str) -> Result<(), PlanError> {
        let mut plans = self.docs.load();
        let before = plans.0.len();
        plans.0.retain(|p| p.id != id);
        if plans.0.len() == before {
            return Err(PlanError::NotFound(id.to_string()));
        }
        self.store(plans);
        tracing::debug!(id, "deleted plan");
        Ok(())
    }

    /// Plans whose date equals `today` (`YYYY-MM-DD`), in time order.
    ///
    /// Bucketing is a plain string comparison at day granularity; the caller
    /// supplies "today" in its own single deployment timezone.
    pub fn today(&self, today: &str) -> Vec<Plan> {
        self.docs.load().0.into_iter().filter(|p| p.date == today).collect()
    }

    /// Plans strictly after `today`.
    pub fn upcoming(&self, today: &str) -> Vec<Plan> {
        self.docs.load().0.into_iter().filter(|p| p.date.as_str() > today).collect()
    }

    /// Plans strictly before `today`. Past plans stay active; this is a view
    /// bucket, not a status.
    pub fn past(&self, today: &str) -> Vec<Plan> {
        self.docs.load().0.into_iter().filter(|p| p.date.as_str() < today).collect()
    }

    fn store(&self, mut plans: PlanList) {
        plans.0.sort_by(|a, b| {
            (a.date.as_str(), a.time.as_str()).cmp(&(b.date.as_str(), b.time.as_str()))
        });
        self.docs.save(&plans);
    }
}

fn validate_title(title: &str) -> Result<(), PlanError> {
    if title.trim().is_empty() {
        return Err(PlanError::Invalid("title cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_date(date: &str) -> Result<(), PlanError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| PlanError::Invalid(format!("date must be YYYY-MM-DD, got {date:?}")))
}

fn validate_time(time: &str) -> Result<(), PlanError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| PlanError::Invalid(format!("time must be HH:mm, got {time:?}")))
}
