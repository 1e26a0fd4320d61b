//! Everything the dashboard shows for one normalized response.
//!
//! Each panel carries its own state so a failing or unconfigured panel never
//! takes the others down with it.

use serde::Serialize;

use crate::{
    advice::{DayPlanInput, day_plan_advice, weather_story, weather_summary},
    air_quality::{AirQualityClient, AqiReading},
    alerts::{WeatherAlert, derive_alerts},
    config::{Config, ServiceId},
    error::WeatherError,
    model::NormalizedWeatherResponse,
    suggestions::{MedicalTip, Suggestion, clothing_suggestions, food_suggestions, medical_tips},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum PanelState<T> {
    Ready(T),
    /// The panel's service is not configured.
    Unavailable(String),
    Failed(String),
}

impl<T> PanelState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    fn from_error(err: WeatherError) -> Self {
        match err {
            WeatherError::ServiceUnavailable(_) => Self::Unavailable(err.to_string()),
            other => Self::Failed(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactChannel {
    Call,
    Text,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyContact {
    pub channel: ContactChannel,
    pub label: &'static str,
    pub href: String,
}

impl EmergencyContact {
    pub fn defaults() -> Vec<Self> {
        const PHONE: &str = "911";
        const EMAIL: &str = "emergency@example.com";

        vec![
            Self {
                channel: ContactChannel::Call,
                label: "Call Emergency Services",
                href: format!("tel:{PHONE}"),
            },
            Self {
                channel: ContactChannel::Text,
                label: "Send Emergency SMS",
                href: format!("sms:{PHONE}?body=EMERGENCY: I need help."),
            },
            Self {
                channel: ContactChannel::Email,
                label: "Email Emergency Contact",
                href: format!("mailto:{EMAIL}?subject=Emergency Assistance Needed"),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: String,
    pub clothing: Vec<Suggestion>,
    pub food: Vec<Suggestion>,
    pub medical: Vec<MedicalTip>,
    pub alerts: Vec<WeatherAlert>,
    pub emergency: Vec<EmergencyContact>,
    pub air_quality: PanelState<AqiReading>,
    /// Day-planner advice; gated on the AI service key.
    pub day_plan: PanelState<String>,
    /// Weather story; gated on the AI service key.
    pub story: PanelState<String>,
    /// Playlist search query for the music panel.
    pub music: PanelState<String>,
    /// Link to a map centred on the location.
    pub map: PanelState<String>,
}

impl Dashboard {
    pub async fn build(response: &NormalizedWeatherResponse, config: &Config, now_hour: u32) -> Self {
        let condition = response.current.condition.text.as_str();
        let temp_c = response.current.temp_c;

        let air_quality = air_quality_panel(response, config).await;

        let day_plan = gated(config, ServiceId::Ai, || {
            DayPlanInput::from_response(response, now_hour)
                .map(|input| PanelState::Ready(day_plan_advice(&input)))
                .unwrap_or_else(|| PanelState::Failed(WeatherError::NoData.to_string()))
        });
        let story = gated(config, ServiceId::Ai, || {
            PanelState::Ready(weather_story(&response.location.name, condition, temp_c))
        });
        let music = gated(config, ServiceId::Music, || {
            PanelState::Ready(music_query(condition, temp_c))
        });
        let map = gated(config, ServiceId::Map, || {
            PanelState::Ready(map_link(response.location.lat, response.location.lon))
        });

        Self {
            summary: weather_summary(response),
            clothing: clothing_suggestions(condition, temp_c),
            food: food_suggestions(condition, temp_c),
            medical: medical_tips(condition, temp_c),
            alerts: derive_alerts(response),
            emergency: EmergencyContact::defaults(),
            air_quality,
            day_plan,
            story,
            music,
            map,
        }
    }
}

fn gated<T>(config: &Config, id: ServiceId, build: impl FnOnce() -> PanelState<T>) -> PanelState<T> {
    match config.require_api_key(id) {
        Ok(_) => build(),
        Err(err) => {
            tracing::debug!(service = %id, "panel disabled, no API key");
            PanelState::from_error(err)
        }
    }
}

async fn air_quality_panel(response: &NormalizedWeatherResponse, config: &Config) -> PanelState<AqiReading> {
    let client = match AirQualityClient::from_config(config) {
        Ok(client) => client,
        Err(err) => return PanelState::from_error(err),
    };

    match client.fetch(response.location.lat, response.location.lon).await {
        Ok(Some(reading)) => PanelState::Ready(reading),
        Ok(None) => PanelState::Failed("No air quality reading for this location".to_string()),
        Err(err) => {
            tracing::warn!(error = %err, "air quality panel degraded");
            PanelState::from_error(err)
        }
    }
}

/// Playlist query matching the mood of the weather.
pub fn music_query(condition: &str, temp_c: f64) -> String {
    let condition = condition.to_lowercase();
    let mood = if condition.contains("thunder") {
        "stormy ambient"
    } else if condition.contains("rain") || condition.contains("drizzle") || condition.contains("showers") {
        "rainy day lofi"
    } else if condition.contains("snow") || condition.contains("sleet") {
        "cozy winter acoustic"
    } else if condition.contains("fog") || condition.contains("cloud") {
        "mellow indie"
    } else if temp_c >= 25.0 {
        "summer vibes"
    } else {
        "upbeat sunny day"
    };
    format!("{mood} playlist")
}

pub fn map_link(lat: f64, lon: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=13/{lat}/{lon}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::fixtures::hourly_series;
    use crate::model::{ForecastPayload, ForecastProperties, Geometry};
    use crate::normalize::{LocationLabel, normalize};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn response() -> NormalizedWeatherResponse {
        let payload = ForecastPayload {
            geometry: Some(Geometry { coordinates: vec![10.75, 59.9, 20.0] }),
            properties: ForecastProperties { timeseries: hourly_series(72, "rain") },
        };
        normalize(&payload, &LocationLabel::new("Oslo", "Norway")).unwrap()
    }

    #[tokio::test]
    async fn unconfigured_panels_are_unavailable_others_ready() {
        let dashboard = Dashboard::build(&response(), &Config::default(), 9).await;

        assert!(matches!(dashboard.air_quality, PanelState::Unavailable(_)));
        assert!(matches!(dashboard.music, PanelState::Unavailable(_)));
        assert!(matches!(dashboard.map, PanelState::Unavailable(_)));
        assert!(matches!(dashboard.day_plan, PanelState::Unavailable(ref msg) if msg.contains("API key")));
        assert!(matches!(dashboard.story, PanelState::Unavailable(_)));

        assert!(!dashboard.clothing.is_empty());
        assert!(!dashboard.food.is_empty());
        assert!(dashboard.medical.len() >= 3);
        assert_eq!(dashboard.emergency.len(), 3);
        assert!(dashboard.summary.starts_with("Rain in Oslo"));
    }

    #[tokio::test]
    async fn configured_panels_are_ready() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed/geo:59.9;10.75/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "data": { "aqi": 120, "dominentpol": "o3" }
            })))
            .mount(&mock_server)
            .await;

        let mut config = Config::default();
        config.endpoints.air_quality = mock_server.uri();
        for id in ServiceId::all() {
            config.upsert_service_api_key(*id, "key".to_string());
        }

        let dashboard = Dashboard::build(&response(), &config, 9).await;

        assert_eq!(dashboard.air_quality.ready().map(|r| r.aqi), Some(120));
        assert_eq!(dashboard.music.ready().map(String::as_str), Some("rainy day lofi playlist"));
        assert!(dashboard.map.ready().is_some_and(|link| link.contains("mlat=59.9")));
        assert!(dashboard.day_plan.ready().is_some());
        assert!(dashboard.story.ready().is_some_and(|story| story.contains("clouds over Oslo")));
    }

    #[tokio::test]
    async fn air_quality_failure_does_not_abort_dashboard() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let mut config = Config::default();
        config.endpoints.air_quality = mock_server.uri();
        config.upsert_service_api_key(ServiceId::AirQuality, "key".to_string());

        let dashboard = Dashboard::build(&response(), &config, 9).await;

        assert!(matches!(dashboard.air_quality, PanelState::Failed(_)));
        assert!(!dashboard.clothing.is_empty());
    }

    #[test]
    fn emergency_links() {
        let hrefs: Vec<_> = EmergencyContact::defaults().into_iter().map(|c| c.href).collect();
        assert_eq!(hrefs[0], "tel:911");
        assert!(hrefs[1].starts_with("sms:911"));
        assert!(hrefs[2].starts_with("mailto:emergency@example.com"));
    }

    #[test]
    fn music_mood_follows_condition() {
        assert_eq!(music_query("Heavy Rain And Thunder", 20.0), "stormy ambient playlist");
        assert_eq!(music_query("Clear Sky", 30.0), "summer vibes playlist");
        assert_eq!(music_query("Light Snow", -2.0), "cozy winter acoustic playlist");
    }
}
