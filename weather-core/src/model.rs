use serde::{Deserialize, Serialize};

/// Current conditions for one city, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Provider's canonical name for the place.
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    /// Offset from UTC, in seconds.
    pub utc_offset_secs: i32,
    pub sunrise: i64,
    pub sunset: i64,
    /// Coarse category, e.g. "Clear" or "Rain".
    pub condition: String,
    /// Localized free-text description.
    pub description: String,
}
