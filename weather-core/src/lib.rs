//! Core library for the Telegram weather bot.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the weather provider and its OpenWeather client
//! - Formatting of the weather report sent back to the user
//!
//! It is used by `weather-bot`, but has no dependency on the messaging platform.

pub mod config;
pub mod model;
pub mod provider;
pub mod report;

pub use config::{Config, Settings};
pub use model::CurrentWeather;
pub use provider::{CITY_NOT_FOUND, LookupError, WeatherProvider, weather_reply};
