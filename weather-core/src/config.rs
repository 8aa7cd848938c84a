use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const WEATHER_TOKEN_VAR: &str = "WEATHER_TOKEN";
pub const API_URL_VAR: &str = "WEATHER_API_URL";
pub const TIMEOUT_VAR: &str = "WEATHER_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Configuration layer as stored on disk and overridden by the environment.
///
/// Example TOML:
/// ```toml
/// telegram_token = "..."
/// weather_token = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub telegram_token: Option<String>,
    pub weather_token: Option<String>,

    /// Base URL of the OpenWeather API, without the trailing `/weather`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Per-request HTTP timeout. Absent means requests may wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Fully resolved runtime settings. Both tokens are guaranteed non-blank.
#[derive(Debug, Clone)]
pub struct Settings {
    pub telegram_token: String,
    pub weather_token: String,
    pub api_url: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-bot", "weather-bot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values found through `lookup` (normally `std::env::var`) on top of this config.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TELEGRAM_TOKEN_VAR) {
            self.telegram_token = Some(token);
        }
        if let Some(token) = lookup(WEATHER_TOKEN_VAR) {
            self.weather_token = Some(token);
        }
        if let Some(url) = lookup(API_URL_VAR) {
            self.api_url = Some(url);
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'"))?;
            self.request_timeout_secs = Some(secs);
        }

        Ok(())
    }

    /// Load the file layer, then the process environment.
    pub fn from_environment() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Validate and turn the layered config into runtime settings.
    pub fn resolve(&self) -> Result<Settings> {
        let telegram_token = required(self.telegram_token.as_deref(), TELEGRAM_TOKEN_VAR)?;
        let weather_token = required(self.weather_token.as_deref(), WEATHER_TOKEN_VAR)?;

        let api_url = self
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Settings {
            telegram_token,
            weather_token,
            api_url,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }
}

fn required(value: Option<&str>, var: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(anyhow!(
            "{var} is not set.\n\
             Hint: export {var}, put it in a .env file, or run `weather-bot configure`."
        )),
    }
}
