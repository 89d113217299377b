//! Maps service-crate errors to wearcast_core::AppError for consistent
//! user-facing messages.

use wearcast_core::{AppError, NetworkError, StorageError, WeatherError};

pub fn store_error(e: wearcast_store::StoreError) -> AppError {
    match e {
        wearcast_store::StoreError::Io(io) => {
            AppError::Storage(StorageError::WriteFailed(io.to_string()))
        }
        wearcast_store::StoreError::CapacityExceeded { .. } => {
            AppError::Storage(StorageError::Full(e.to_string()))
        }
    }
}

pub fn weather_error(e: wearcast_weather::WeatherError) -> AppError {
    match e {
        wearcast_weather::WeatherError::Network(inner) => {
            AppError::Network(NetworkError::ConnectionFailed(inner.to_string()))
        }
        wearcast_weather::WeatherError::Upstream { info, infocode } => {
            AppError::Weather(WeatherError::ApiError(format!("{info} ({infocode})")))
        }
        wearcast_weather::WeatherError::Empty(city) => {
            AppError::Weather(WeatherError::NoData(city))
        }
    }
}
