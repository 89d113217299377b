//! HTTP client for the Amap weather REST API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::types::{DayForecast, LiveConditions, WeatherBundle, WeatherError};

pub const DEFAULT_BASE_URL: &str = "https://restapi.amap.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// The vendor reports everything as strings, numerics included, inside a
/// status envelope. `status` is "1" on success.
#[derive(Debug, Deserialize)]
struct LiveResponse {
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    infocode: String,
    #[serde(default)]
    lives: Vec<RawLive>,
}

#[derive(Debug, Deserialize)]
struct RawLive {
    #[serde(default)]
    city: String,
    #[serde(default)]
    weather: String,
    #[serde(default)]
    temperature: String,
    #[serde(default)]
    winddirection: String,
    #[serde(default)]
    windpower: String,
    #[serde(default)]
    humidity: String,
    #[serde(default)]
    reporttime: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    status: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    infocode: String,
    #[serde(default)]
    forecasts: Vec<RawForecast>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    #[serde(default)]
    casts: Vec<RawCast>,
}

#[derive(Debug, Deserialize)]
struct RawCast {
    #[serde(default)]
    date: String,
    #[serde(default)]
    dayweather: String,
    #[serde(default)]
    nightweather: String,
    #[serde(default)]
    daytemp: String,
    #[serde(default)]
    nighttemp: String,
    #[serde(default)]
    daywind: String,
    #[serde(default)]
    nightwind: String,
    #[serde(default)]
    daypower: String,
    #[serde(default)]
    nightpower: String,
}

/// Weather API client. Cheap to clone; one reqwest client is shared.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Client against the production vendor endpoint.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client against an alternate endpoint (used by tests).
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetch current conditions and the multi-day forecast for a city code.
    ///
    /// # Errors
    /// `Upstream` when the vendor rejects the request (non-"1" status),
    /// `Empty` when it accepts but returns no data, `Network` on transport
    /// failure.
    pub async fn fetch(&self, city_code: &str) -> Result<WeatherBundle, WeatherError> {
        let live: LiveResponse = self.request(city_code, "base").await?;
        if live.status != "1" {
            return Err(WeatherError::Upstream { info: live.info, infocode: live.infocode });
        }
        let Some(raw) = live.lives.into_iter().next() else {
            return Err(WeatherError::Empty(city_code.to_string()));
        };

        let forecast: ForecastResponse = self.request(city_code, "all").await?;
        if forecast.status != "1" {
            return Err(WeatherError::Upstream {
                info: forecast.info,
                infocode: forecast.infocode,
            });
        }
        let Some(city_forecast) = forecast.forecasts.into_iter().next() else {
            return Err(WeatherError::Empty(city_code.to_string()));
        };

        let current = LiveConditions {
            temperature: parse_num(&raw.temperature),
            humidity: parse_num(&raw.humidity),
            weather: or_unknown(raw.weather),
            wind_direction: or_unknown(raw.winddirection),
            wind_power: or_unknown(raw.windpower),
            report_time: raw.reporttime,
            city: or_unknown(raw.city),
        };
        let forecast = city_forecast
            .casts
            .into_iter()
            .map(|cast| DayForecast {
                date: cast.date,
                day_weather: cast.dayweather,
                night_weather: cast.nightweather,
                day_temp: parse_num(&cast.daytemp),
                night_temp: parse_num(&cast.nighttemp),
                day_wind: cast.daywind,
                night_wind: cast.nightwind,
                day_power: cast.daypower,
                night_power: cast.nightpower,
            })
            .collect();

        tracing::debug!(city = %current.city, temp = current.temperature, "fetched weather");
        Ok(WeatherBundle { current, forecast })
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        city_code: &str,
        extensions: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/v3/weather/weatherInfo", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("city", city_code), ("extensions", extensions)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// The vendor occasionally omits numeric fields; treat anything unparsable
/// as zero rather than failing the whole fetch.
fn parse_num(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

fn or_unknown(value: String) -> String {
    if value.is_empty() {
        "unknown".to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn live_body() -> serde_json::Value {
        serde_json::json!({
            "status": "1",
            "count": "1",
            "info": "OK",
            "infocode": "10000",
            "lives": [{
                "province": "浙江",
                "city": "仙居县",
                "adcode": "331024",
                "weather": "小雨",
                "temperature": "18",
                "winddirection": "东南",
                "windpower": "≤3",
                "humidity": "82",
                "reporttime": "2024-03-20 07:30:00"
            }]
        })
    }

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "status": "1",
            "count": "1",
            "info": "OK",
            "infocode": "10000",
            "forecasts": [{
                "city": "仙居县",
                "adcode": "331024",
                "province": "浙江",
                "reporttime": "2024-03-20 07:30:00",
                "casts": [{
                    "date": "2024-03-20",
                    "week": "3",
                    "dayweather": "小雨",
                    "nightweather": "阴",
                    "daytemp": "20",
                    "nighttemp": "12",
                    "daywind": "东南",
                    "nightwind": "东南",
                    "daypower": "1-3",
                    "nightpower": "1-3"
                }]
            }]
        })
    }

    async fn mock_weather(server: &MockServer, extensions: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v3/weather/weatherInfo"))
            .and(query_param("extensions", extensions))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_translates_vendor_payloads() {
        let server = MockServer::start().await;
        mock_weather(&server, "base", live_body()).await;
        mock_weather(&server, "all", forecast_body()).await;

        let client = WeatherClient::with_base_url("test-key", server.uri()).unwrap();
        let bundle = client.fetch("331024").await.unwrap();

        assert_eq!(bundle.current.temperature, 18);
        assert_eq!(bundle.current.humidity, 82);
        assert_eq!(bundle.current.weather, "小雨");
        assert_eq!(bundle.current.city, "仙居县");
        assert_eq!(bundle.forecast.len(), 1);
        assert_eq!(bundle.forecast[0].day_temp, 20);
        assert_eq!(bundle.forecast[0].night_weather, "阴");
    }

    #[tokio::test]
    async fn test_vendor_rejection_is_upstream_error() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "status": "0",
            "info": "INVALID_USER_KEY",
            "infocode": "10001"
        });
        mock_weather(&server, "base", body).await;

        let client = WeatherClient::with_base_url("bad-key", server.uri()).unwrap();
        let err = client.fetch("331024").await.unwrap_err();

        match err {
            WeatherError::Upstream { info, infocode } => {
                assert_eq!(info, "INVALID_USER_KEY");
                assert_eq!(infocode, "10001");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_result_is_distinct_error() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "status": "1",
            "info": "OK",
            "infocode": "10000",
            "lives": []
        });
        mock_weather(&server, "base", body).await;

        let client = WeatherClient::with_base_url("test-key", server.uri()).unwrap();
        let err = client.fetch("331024").await.unwrap_err();
        assert!(matches!(err, WeatherError::Empty(city) if city == "331024"));
    }

    #[tokio::test]
    async fn test_unparsable_numerics_default_to_zero() {
        let server = MockServer::start().await;
        let mut body = live_body();
        body["lives"][0]["temperature"] = "".into();
        body["lives"][0]["humidity"] = "n/a".into();
        mock_weather(&server, "base", body).await;
        mock_weather(&server, "all", forecast_body()).await;

        let client = WeatherClient::with_base_url("test-key", server.uri()).unwrap();
        let bundle = client.fetch("331024").await.unwrap();

        assert_eq!(bundle.current.temperature, 0);
        assert_eq!(bundle.current.humidity, 0);
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/weather/weatherInfo"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = WeatherClient::with_base_url("test-key", server.uri()).unwrap();
        let err = client.fetch("331024").await.unwrap_err();
        assert!(matches!(err, WeatherError::Network(_)));
    }
}
