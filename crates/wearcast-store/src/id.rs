//! Client-generated identifiers.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Millisecond-clock id, bumped past the previous issue so rapid calls within
/// one process stay strictly increasing. Uniqueness is not otherwise checked;
/// entities carry these ids for their whole lifetime.
pub fn timestamp_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    let prev = match LAST_ID.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
        Some(millis.max(last + 1))
    }) {
        Ok(v) | Err(v) => v,
    };
    millis.max(prev + 1).to_string()
}
