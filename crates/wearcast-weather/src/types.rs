use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current conditions for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveConditions {
    pub temperature: i32,
    pub humidity: i32,
    /// Vendor condition name, e.g. "晴" or "小雨".
    pub weather: String,
    pub wind_direction: String,
    pub wind_power: String,
    pub report_time: String,
    pub city: String,
}

/// One day of the multi-day forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    pub date: String,
    pub day_weather: String,
    pub night_weather: String,
    pub day_temp: i32,
    pub night_temp: i32,
    pub day_wind: String,
    pub night_wind: String,
    pub day_power: String,
    pub night_power: String,
}

/// Current conditions plus the multi-day forecast, fetched together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub current: LiveConditions,
    pub forecast: Vec<DayForecast>,
}

/// Weather adapter errors. An upstream rejection is always distinguishable
/// from a transport failure; neither is ever folded into a success value.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weather service rejected the request: {info} (code {infocode})")]
    Upstream { info: String, infocode: String },

    #[error("weather service returned no data for city {0}")]
    Empty(String),
}
