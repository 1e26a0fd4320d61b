//! Air quality index lookups (WAQI feed API) and AQI banding.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, ServiceId},
    error::{Result, WeatherError, parse_json, read_success_body},
    provider::http_client,
};

const SERVICE: &str = "air quality";

/// US EPA style AQI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    pub fn health_concern(self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory.",
            Self::Moderate => "Some pollutants may be a concern for unusually sensitive people.",
            Self::UnhealthyForSensitiveGroups => {
                "Sensitive groups may experience health effects."
            }
            Self::Unhealthy => "Unhealthy. Reduce prolonged or heavy exertion outdoors.",
            Self::VeryUnhealthy => "Health alert: everyone may experience more serious effects.",
            Self::Hazardous => "Health warnings of emergency conditions.",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Good | Self::Moderate => "Enjoy your day!",
            Self::UnhealthyForSensitiveGroups => {
                "People with respiratory conditions should limit time outdoors."
            }
            Self::Unhealthy | Self::VeryUnhealthy => {
                "Consider wearing a mask if outside for extended periods."
            }
            Self::Hazardous => "Stay indoors and keep windows closed.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiReading {
    pub aqi: u32,
    pub category: AqiCategory,
    pub dominant_pollutant: Option<String>,
    pub station: Option<String>,
}

impl AqiReading {
    pub fn new(aqi: u32, dominant_pollutant: Option<String>, station: Option<String>) -> Self {
        Self {
            aqi,
            category: AqiCategory::from_aqi(aqi),
            dominant_pollutant,
            station,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    status: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    /// A number, or "-" when the station has no current reading.
    aqi: serde_json::Value,
    #[serde(rename = "dominentpol")]
    dominant_pollutant: Option<String>,
    city: Option<FeedCity>,
}

#[derive(Debug, Deserialize)]
struct FeedCity {
    name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AirQualityClient {
    base_url: String,
    token: String,
    http: Client,
}

impl AirQualityClient {
    pub fn new(base_url: &str, user_agent: &str, token: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http: http_client(user_agent)?,
        })
    }

    /// Fails with [`WeatherError::ServiceUnavailable`] when no key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.require_api_key(ServiceId::AirQuality)?;
        Self::new(&config.endpoints.air_quality, &config.endpoints.user_agent, token)
    }

    /// Current AQI near the coordinates. `Ok(None)` when the station has no reading.
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<Option<AqiReading>> {
        let url = format!("{}/feed/geo:{lat};{lon}/", self.base_url);
        tracing::debug!(%url, "fetching air quality");

        let res = self
            .http
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;

        let body = read_success_body(SERVICE, res).await?;
        let feed: FeedResponse = parse_json(SERVICE, &body)?;

        if feed.status != "ok" {
            let reason = feed.data.as_str().unwrap_or("unknown error").to_string();
            return Err(WeatherError::Provider(format!(
                "Air quality request failed: {reason}"
            )));
        }

        let data: FeedData = serde_json::from_value(feed.data)
            .map_err(|source| WeatherError::Parse { service: SERVICE, source })?;

        let Some(aqi) = data.aqi.as_u64().and_then(|v| u32::try_from(v).ok()) else {
            tracing::debug!(aqi = %data.aqi, "station reported no usable AQI");
            return Ok(None);
        };

        Ok(Some(AqiReading::new(
            aqi,
            data.dominant_pollutant,
            data.city.and_then(|c| c.name),
        )))
    }
}
