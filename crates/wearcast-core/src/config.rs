use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Directory the persisted store writes its documents under
    pub data_dir: PathBuf,

    /// Weather vendor settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Outfit-recommendation assistant settings
    #[serde(default)]
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather vendor API key
    pub api_key: String,

    /// Vendor endpoint
    pub base_url: String,

    /// City code fetched before the user picks a location
    pub default_city: String,

    /// Refresh interval in minutes
    pub refresh_minutes: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://restapi.amap.com".to_string(),
            default_city: "331024".to_string(),
            refresh_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Chat-completions API key (optional; the local rule covers for it)
    pub api_key: String,

    /// OpenAI-compatible endpoint
    pub base_url: String,

    /// Model name sent with each request
    pub model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wearcast");
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wearcast");

        Self {
            config_dir,
            data_dir,
            weather: WeatherConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        self.validate_url(&self.assistant.base_url, "assistant.base_url", &mut result);

        // Missing keys degrade features rather than break the app
        if self.weather.api_key.is_empty() {
            result.add_warning(
                "weather.api_key",
                "Weather API key not configured - weather data will be unavailable",
            );
        }
        if self.assistant.api_key.is_empty() {
            result.add_warning(
                "assistant.api_key",
                "Assistant API key not configured - only local outfit advice will be shown",
            );
        }

        if self.assistant.model.trim().is_empty() {
            result.add_error("assistant.model", "Model name cannot be empty");
        }

        if self.weather.default_city.is_empty() {
            result.add_error("weather.default_city", "Default city code cannot be empty");
        } else if !self.weather.default_city.chars().all(|c| c.is_ascii_digit()) {
            result.add_error(
                "weather.default_city",
                format!(
                    "City code must be a numeric adcode, got: {}",
                    self.weather.default_city
                ),
            );
        }

        // Validate weather refresh interval
        if self.weather.refresh_minutes == 0 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh disabled (0 minutes)",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                // Check scheme
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                // Check host
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                // Validate port if explicitly specified
                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(
                    field_name,
                    format!("Invalid URL: {}", e),
                );
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wearcast");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_missing_api_keys_are_warnings() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.warnings.iter().any(|w| w.field == "weather.api_key"));
        assert!(result.warnings.iter().any(|w| w.field == "assistant.api_key"));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.assistant.base_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_non_numeric_city_code_is_an_error() {
        let mut config = Config::default();
        config.weather.default_city = "hangzhou".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.default_city"));
    }

    #[test]
    fn test_zero_refresh_is_a_warning() {
        let mut config = Config::default();
        config.weather.refresh_minutes = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.refresh_minutes"));
    }

    #[test]
    fn test_empty_model_is_an_error() {
        let mut config = Config::default();
        config.assistant.model = "  ".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.weather.default_city, config.weather.default_city);
        assert_eq!(parsed.assistant.model, config.assistant.model);
    }
}
