use crate::{
    config::Config,
    error::Result,
    geocode::Geocoder,
    model::NormalizedWeatherResponse,
    normalize::{LocationLabel, normalize},
    provider::{WeatherProvider, provider_from_config},
};

/// Resolves a location and returns its normalized forecast.
#[derive(Debug)]
pub struct WeatherService {
    provider: Box<dyn WeatherProvider>,
    geocoder: Geocoder,
}

impl WeatherService {
    pub fn new(provider: Box<dyn WeatherProvider>, geocoder: Geocoder) -> Self {
        Self { provider, geocoder }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(provider_from_config(config)?, Geocoder::from_config(config)?))
    }

    pub fn geocoder(&self) -> &Geocoder {
        &self.geocoder
    }

    /// Forecast for a free-text place name. `Ok(None)` when the place is not found.
    pub async fn for_query(&self, query: &str) -> Result<Option<NormalizedWeatherResponse>> {
        let Some(location) = self.geocoder.forward_geocode(query).await? else {
            tracing::info!(query, "location not found");
            return Ok(None);
        };

        let response = self
            .fetch(location.latitude, location.longitude, &location.label())
            .await?;
        Ok(Some(response))
    }

    /// Forecast for coordinates, labelled by reverse geocoding when possible.
    ///
    /// The label is cosmetic: a failed reverse lookup falls back to
    /// "Unknown Location" instead of failing the forecast.
    pub async fn for_coordinates(&self, lat: f64, lon: f64) -> Result<NormalizedWeatherResponse> {
        let label = match self.geocoder.reverse_geocode(lat, lon).await {
            Ok(location) => location.map(|l| l.label()).unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %err, lat, lon, "reverse geocoding failed, using fallback label");
                LocationLabel::default()
            }
        };

        self.fetch(lat, lon, &label).await
    }

    async fn fetch(&self, lat: f64, lon: f64, label: &LocationLabel) -> Result<NormalizedWeatherResponse> {
        tracing::debug!(provider = self.provider.name(), lat, lon, "fetching forecast");
        let payload = self.provider.fetch_timeseries(lat, lon).await?;
        normalize(&payload, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use crate::provider::metno::MetNoProvider;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const UA: &str = "weatherwise-tests/1.0";

    /// Temperatures rise by one degree an hour from 10°C, restarting each day.
    fn compact_payload(hours: i64, symbol: &str) -> Value {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let timeseries: Vec<Value> = (0..hours)
            .map(|h| {
                json!({
                    "time": start + Duration::hours(h),
                    "data": {
                        "instant": { "details": {
                            "air_temperature": 10.0 + (h % 24) as f64,
                            "relative_humidity": 60.0,
                            "wind_speed": 2.0,
                            "wind_from_direction": 90.0
                        } },
                        "next_1_hours": {
                            "summary": { "symbol_code": symbol },
                            "details": { "precipitation_amount": 0.0 }
                        }
                    }
                })
            })
            .collect();

        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [10.75, 59.9, 20] },
            "properties": { "timeseries": timeseries }
        })
    }

    fn service(server: &MockServer) -> WeatherService {
        let provider = MetNoProvider::new(&server.uri(), UA).unwrap();
        let geocoder = Geocoder::new(&server.uri(), UA).unwrap();
        WeatherService::new(Box::new(provider), geocoder)
    }

    #[tokio::test]
    async fn query_is_geocoded_fetched_and_normalized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Oslo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "lat": "59.9", "lon": "10.75", "name": "Oslo", "address": { "country": "Norway" } }
            ])))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .and(query_param("lat", "59.9"))
            .and(query_param("lon", "10.75"))
            .respond_with(ResponseTemplate::new(200).set_body_json(compact_payload(72, "clearsky_day")))
            .mount(&mock_server)
            .await;

        let response = service(&mock_server).for_query("Oslo").await.unwrap().unwrap();

        assert_eq!(response.location.name, "Oslo");
        assert_eq!(response.location.country, "Norway");
        assert_eq!(response.current.condition.text, "Clear Sky");
        assert_eq!(response.current.temp_c, 10.0);
        assert_eq!(response.forecast.forecastday.len(), 3);

        for day in &response.forecast.forecastday {
            assert_eq!(day.hour.len(), 24);
            assert_eq!(day.day.mintemp_c, 10.0);
            assert_eq!(day.day.maxtemp_c, 33.0);
            assert_eq!(day.day.avgtemp_c, 21.5);
            assert_eq!(day.day.condition.text, "Clear Sky");
        }
    }

    #[tokio::test]
    async fn unknown_query_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let result = service(&mock_server).for_query("Nowhere").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn coordinates_without_reverse_match_use_fallback_label() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "Unable to geocode" })),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(compact_payload(24, "fog")))
            .mount(&mock_server)
            .await;

        let response = service(&mock_server).for_coordinates(59.9, 10.75).await.unwrap();

        assert_eq!(response.location.name, "Unknown Location");
        assert_eq!(response.location.country, "Unknown");
        assert_eq!(response.current.condition.text, "Fog");
    }

    #[tokio::test]
    async fn failed_reverse_lookup_still_returns_forecast() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(compact_payload(24, "cloudy")))
            .mount(&mock_server)
            .await;

        let response = service(&mock_server).for_coordinates(59.9, 10.75).await.unwrap();

        assert_eq!(response.location.name, "Unknown Location");
        assert_eq!(response.location.country, "Unknown");
        assert_eq!(response.forecast.forecastday.len(), 1);
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = service(&mock_server).for_coordinates(1.0, 2.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::Status { .. }));
        assert!(err.is_retryable_by_user());
    }
}
