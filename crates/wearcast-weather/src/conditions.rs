//! Helpers over the vendor's condition vocabulary.
//!
//! The vendor reports condition names in Chinese ("晴", "小雨", ...). These
//! helpers also accept English words so locally built strings and test
//! fixtures behave the same.

/// Icon slug for a vendor condition name. Unknown conditions map to
/// "unknown" rather than failing.
pub fn weather_icon(weather: &str) -> &'static str {
    match weather {
        "晴" => "sunny",
        "多云" => "cloudy",
        "阴" => "overcast",
        "小雨" => "light-rain",
        "中雨" => "moderate-rain",
        "大雨" => "heavy-rain",
        "暴雨" => "storm",
        "雷阵雨" => "thunder",
        "雪" => "snow",
        "雾" => "fog",
        _ => "unknown",
    }
}

/// Whether the condition string carries a rain indicator.
pub fn is_rainy(weather: &str) -> bool {
    weather.contains('雨') || weather.to_lowercase().contains("rain")
}

/// Whether the condition string carries a snow indicator.
pub fn is_snowy(weather: &str) -> bool {
    weather.contains('雪') || weather.to_lowercase().contains("snow")
}

/// Whether the condition string carries a wind indicator.
pub fn is_windy(weather: &str) -> bool {
    weather.contains('风') || weather.to_lowercase().contains("wind")
}
