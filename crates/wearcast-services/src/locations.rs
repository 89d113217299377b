//! Saved locations and location preferences.
//!
//! The map vendor does the geocoding; these repositories only persist what
//! the user keeps: favorite places and the lookup preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wearcast_store::{events, timestamp_id, DocStore, Document, StoreContext};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Vendor administrative-area code, doubles as the weather city code.
    pub adcode: String,
    pub city: String,
    pub district: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

/// Fields supplied when saving a place; id and created_at are generated.
#[derive(Debug, Clone)]
pub struct LocationDraft {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub adcode: String,
    pub city: String,
    pub district: String,
    pub is_favorite: bool,
}

/// Newtype wrapper so [`Document`] can be implemented for the location list
/// without violating the orphan rule (`Document` and `Vec` are both foreign
/// to this crate). Serializes identically to `Vec<StoredLocation>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct StoredLocationList(Vec<StoredLocation>);

impl Document for StoredLocationList {
    const KEY: &'static str = "wearcast-locations";
    const EVENT: &'static str = events::LOCATIONS_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self(Vec::new())
    }
}

pub struct LocationRepository {
    docs: DocStore<StoredLocationList>,
}

impl LocationRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    pub fn list(&self) -> Vec<StoredLocation> {
        self.docs.load().0
    }

    pub fn favorites(&self) -> Vec<StoredLocation> {
        self.docs.load().0.into_iter().filter(|l| l.is_favorite).collect()
    }

    pub fn add(&self, draft: LocationDraft, now: DateTime<Utc>) -> StoredLocation {
        let location = StoredLocation {
            id: timestamp_id(now),
            name: draft.name,
            address: draft.address,
            latitude: draft.latitude,
            longitude: draft.longitude,
            adcode: draft.adcode,
            city: draft.city,
            district: draft.district,
            is_favorite: draft.is_favorite,
            created_at: now,
            last_used: None,
        };
        let mut locations = self.docs.load();
        locations.0.push(location.clone());
        self.docs.save(&locations);
        location
    }

    /// Stamp a location as just used. Unknown ids are ignored.
    pub fn touch(&self, id: &str, now: DateTime<Utc>) {
        let mut locations = self.docs.load();
        let Some(location) = locations.0.iter_mut().find(|l| l.id == id) else {
            return;
        };
        location.last_used = Some(now);
        self.docs.save(&locations);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPreferences {
    pub auto_locate: bool,
    /// Weather city code used before the user picks anything.
    pub default_city: String,
    pub max_recent_locations: u32,
    /// Meters beyond which a route triggers a weather alert.
    pub weather_alert_distance: u32,
}

impl Default for LocationPreferences {
    fn default() -> Self {
        Self {
            auto_locate: true,
            default_city: "331024".to_string(),
            max_recent_locations: 10,
            weather_alert_distance: 5000,
        }
    }
}

impl Document for LocationPreferences {
    const KEY: &'static str = "wearcast-location-preferences";
    const EVENT: &'static str = events::LOCATION_PREFERENCES_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self::default()
    }
}

pub struct LocationPreferencesRepository {
    docs: DocStore<LocationPreferences>,
}

impl LocationPreferencesRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    pub fn load(&self) -> LocationPreferences {
        self.docs.load()
    }

    pub fn save(&self, preferences: &LocationPreferences) {
        self.docs.save(preferences);
    }
}
