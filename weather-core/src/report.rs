//! Rendering of [`CurrentWeather`] into the Ukrainian text reply.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::CurrentWeather;

const FALLBACK_ICON: &str = "🌍";

/// Glyph for a provider condition category. Unknown categories get a globe.
pub fn condition_icon(condition: &str) -> &'static str {
    match condition {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        "Mist" | "Fog" => "🌫️",
        "Haze" => "🌤️",
        "Smoke" => "💨",
        "Dust" => "🌪️",
        _ => FALLBACK_ICON,
    }
}

/// `UTC +02:00`, `UTC -03:30`, `UTC +00:00`.
pub fn tz_label(offset_secs: i32) -> String {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    format!("UTC {sign}{:02}:{:02}", abs / 3600, abs % 3600 / 60)
}

/// Local wall-clock `HH:MM` for a unix timestamp at a fixed UTC offset.
///
/// Out-of-range inputs fall back to UTC or `--:--` rather than failing the reply.
pub fn local_clock(epoch_secs: i64, offset_secs: i32) -> String {
    let offset = FixedOffset::east_opt(offset_secs).unwrap_or_else(|| Utc.fix());

    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(utc) => utc.with_timezone(&offset).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Shortest decimal form that still shows a fractional part: `3.4`, `0.51`, `3.0`.
pub fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Multi-line report for `city` as typed by the user.
pub fn format_report(city: &str, weather: &CurrentWeather) -> String {
    let offset = weather.utc_offset_secs;

    format!(
        "Погода в населенному пункті {city} / {name}:\n\
         - Часовий пояс: {tz}\n\
         - Погода: {description} {icon}\n\
         - Температура: {temp:.1} °C / Відчувається як: {feels:.1} °C\n\
         - Вологість: {humidity} %\n\
         - Атмосферний тиск: {pressure} hPa\n\
         - Швидкість вітру: {wind} м/с\n\
         - Схід Сонця: {sunrise}\n\
         - Захід Сонця: {sunset}\n",
        city = capitalize(city),
        name = weather.location_name,
        tz = tz_label(offset),
        description = capitalize(&weather.description),
        icon = condition_icon(&weather.condition),
        temp = weather.temperature_c,
        feels = weather.feels_like_c,
        humidity = weather.humidity_pct,
        pressure = weather.pressure_hpa,
        wind = decimal(weather.wind_speed_mps),
        sunrise = local_clock(weather.sunrise, offset),
        sunset = local_clock(weather.sunset, offset),
    )
}
