use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path, path::PathBuf};

use crate::error::WeatherError;

pub const DEFAULT_WEATHER_URL: &str = "https://api.met.no/weatherapi/locationforecast/2.0";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://api.waqi.info";
pub const DEFAULT_USER_AGENT: &str =
    concat!("WeatherWise/", env!("CARGO_PKG_VERSION"), " (https://github.com/weatherwise/weatherwise)");

/// Auxiliary services that need an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    AirQuality,
    Music,
    Map,
    Ai,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::AirQuality => "aqi",
            ServiceId::Music => "music",
            ServiceId::Map => "map",
            ServiceId::Ai => "ai",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceId::AirQuality => "Air quality",
            ServiceId::Music => "Music search",
            ServiceId::Map => "Map",
            ServiceId::Ai => "AI text generation",
        }
    }

    /// Environment variable that overrides the key stored on disk.
    pub fn env_var(&self) -> &'static str {
        match self {
            ServiceId::AirQuality => "WEATHERWISE_AQI_API_KEY",
            ServiceId::Music => "WEATHERWISE_MUSIC_API_KEY",
            ServiceId::Map => "WEATHERWISE_MAP_API_KEY",
            ServiceId::Ai => "WEATHERWISE_AI_API_KEY",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::AirQuality, ServiceId::Music, ServiceId::Map, ServiceId::Ai]
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "aqi" | "air-quality" => Ok(ServiceId::AirQuality),
            "music" => Ok(ServiceId::Music),
            "map" => Ok(ServiceId::Map),
            "ai" => Ok(ServiceId::Ai),
            _ => Err(anyhow!(
                "Unknown service '{value}'. Supported services: aqi, music, map, ai."
            )),
        }
    }
}

/// Base URLs of the upstream HTTP APIs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Endpoints {
    pub weather: String,
    pub geocoder: String,
    pub air_quality: String,
    pub user_agent: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            weather: DEFAULT_WEATHER_URL.to_string(),
            geocoder: DEFAULT_GEOCODER_URL.to_string(),
            air_quality: DEFAULT_AIR_QUALITY_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Credentials for a single auxiliary service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_key: String,
}

/// Top-level configuration, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Example TOML:
    /// [services.aqi]
    /// api_key = "..."
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,
}

impl Config {
    /// Load config from disk (empty default on first run), then apply env overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from_path(&path)?;
        cfg.apply_env_overrides_with(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
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

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherwise", "weatherwise")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay API keys from the environment. Empty values are ignored.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for id in ServiceId::all() {
            if let Some(key) = lookup(id.env_var()).filter(|k| !k.trim().is_empty()) {
                self.upsert_service_api_key(*id, key);
            }
        }
    }

    pub fn upsert_service_api_key(&mut self, id: ServiceId, api_key: String) {
        self.services.insert(id.as_str().to_string(), ServiceConfig { api_key });
    }

    pub fn service_api_key(&self, id: ServiceId) -> Option<&str> {
        self.services
            .get(id.as_str())
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.is_empty())
    }

    pub fn is_service_configured(&self, id: ServiceId) -> bool {
        self.service_api_key(id).is_some()
    }

    /// The API key for `id`, or the "service unavailable" error a panel reports.
    pub fn require_api_key(&self, id: ServiceId) -> Result<&str, WeatherError> {
        self.service_api_key(id).ok_or(WeatherError::ServiceUnavailable(id))
    }
}
