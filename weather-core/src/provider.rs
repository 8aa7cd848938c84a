use crate::{CurrentWeather, report::format_report};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;
use tracing::warn;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Reply used for every non-success HTTP status from the provider.
pub const CITY_NOT_FOUND: &str = "Місто не знайдено! Перевірте правильність назви.";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("weather provider answered with status {status}")]
    Status { status: StatusCode, body: String },

    #[error("failed to reach weather provider")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected weather provider response")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<CurrentWeather, LookupError>;
}

/// Look up `city` and render the user-facing reply.
///
/// Every non-success status collapses into [`CITY_NOT_FOUND`]. Transport and
/// decode failures are returned to the caller.
pub async fn weather_reply(
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<String, LookupError> {
    match provider.current(city).await {
        Ok(weather) => Ok(format_report(city, &weather)),
        Err(LookupError::Status { status, body }) => {
            warn!(%status, city, body = %body, "weather lookup rejected");
            Ok(CITY_NOT_FOUND.to_string())
        }
        Err(e) => Err(e),
    }
}
