use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Settings,
    model::CurrentWeather,
};

use super::{LookupError, WeatherProvider};

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    /// Build a provider honoring the configured base URL and request timeout.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key: settings.weather_token.clone(),
            base_url: settings.api_url.clone(),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

impl TryFrom<OwCurrentResponse> for CurrentWeather {
    type Error = LookupError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let OwCurrentResponse { name, timezone, main, weather, wind, sys } = parsed;

        let condition = weather.into_iter().next().ok_or_else(|| {
            LookupError::Decode(serde::de::Error::invalid_length(0, &"at least one weather entry"))
        })?;

        Ok(CurrentWeather {
            location_name: name,
            temperature_c: main.temp,
            feels_like_c: main.feels_like,
            humidity_pct: main.humidity,
            pressure_hpa: main.pressure,
            wind_speed_mps: wind.speed,
            utc_offset_secs: timezone,
            sunrise: sys.sunrise,
            sunset: sys.sunset,
            condition: condition.main,
            description: condition.description,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentWeather, LookupError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "uk"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status { status, body: truncate_body(&body) });
        }

        debug!(city, payload = %body, "OpenWeather current response");

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        parsed.try_into()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
