//! Centralized error types for the Wearcast application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Service crates keep their own local errors; the app maps them into this
/// type at the display boundary. Use `user_message()` to get a UI-appropriate
/// message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Assistant service error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Auth(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Assistant(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Local storage errors (the persisted key/value store).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Storage full: {0}")]
    Full(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::WriteFailed(_) => {
                "Couldn't save your latest change. It stays applied for this session."
            }
            StorageError::Full(_) => "Local storage is full. Clear some data and try again.",
            StorageError::Corruption(_) => {
                "Some saved data was unreadable and has been reset to defaults."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Not signed in")]
    NotSignedIn,
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid credentials. Please check and try again.",
            AuthError::InvalidCode => "That verification code didn't match. Please try again.",
            AuthError::NotSignedIn => "Not signed in. Please authenticate.",
        }
    }
}

/// Weather service errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API error: {0}")]
    ApiError(String),

    #[error("No data for location: {0}")]
    NoData(String),

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::ApiError(_) => "Weather service error. Please try again.",
            WeatherError::NoData(_) => "No weather data for that city. Check and try again.",
            WeatherError::ServiceUnavailable => {
                "Weather service unavailable. Please try again later."
            }
        }
    }
}

/// Recommendation assistant errors.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant API error: {0}")]
    ApiError(String),

    #[error("Assistant returned an unusable reply: {0}")]
    BadReply(String),
}

impl AssistantError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AssistantError::ApiError(_) | AssistantError::BadReply(_) => {
                "Smart suggestions are unavailable; showing standard advice instead."
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
