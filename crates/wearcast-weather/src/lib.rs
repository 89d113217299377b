//! Weather data adapter.
//!
//! Wraps the Amap weather REST vendor: translates its string-typed payloads
//! into internal types, surfaces upstream rejections as distinct errors, and
//! provides a cancellable periodic refresh for views that poll.

pub mod client;
pub mod conditions;
pub mod refresh;
pub mod types;

pub use client::{WeatherClient, DEFAULT_BASE_URL};
pub use conditions::{is_rainy, is_snowy, is_windy, weather_icon};
pub use refresh::{spawn_periodic, RefreshHandle};
pub use types::{DayForecast, LiveConditions, WeatherBundle, WeatherError};
