pub mod config;
pub mod error;

pub use config::{AssistantConfig, Config, ValidationResult, WeatherConfig};
pub use error::{
    AppError, AssistantError, AuthError, ConfigError, NetworkError, StorageError, WeatherError,
};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Wearcast core initialized");
    Ok(())
}
