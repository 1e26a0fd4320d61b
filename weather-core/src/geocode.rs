//! Forward and reverse geocoding against Nominatim (OpenStreetMap).
//! Free, no API key; the usage policy requires an identifying User-Agent.

use reqwest::{Client, header::ACCEPT};
use serde::{Deserialize, Serialize};

use crate::{
    Config,
    error::{Result, parse_json, read_success_body},
    normalize::LocationLabel,
    provider::http_client,
};

const SERVICE: &str = "geocoder";
const UNKNOWN_NAME: &str = "Unknown Location";
const UNKNOWN_COUNTRY: &str = "Unknown";

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl Location {
    pub fn label(&self) -> LocationLabel {
        LocationLabel::new(self.name.clone(), self.country.clone())
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    name: Option<String>,
    display_name: Option<String>,
    lat: Option<Coordinate>,
    lon: Option<Coordinate>,
    address: Option<NominatimAddress>,
    /// Set instead of the place fields when nothing matched, e.g. "Unable to geocode".
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    country: Option<String>,
}

/// Nominatim sends coordinates as strings; accept numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Option<f64> {
        match self {
            Coordinate::Number(n) => Some(*n),
            Coordinate::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl NominatimPlace {
    fn into_location(self) -> Option<Location> {
        if let Some(error) = &self.error {
            tracing::debug!(%error, "geocoder reported no match");
            return None;
        }

        let latitude = self.lat.as_ref().and_then(Coordinate::value)?;
        let longitude = self.lon.as_ref().and_then(Coordinate::value)?;
        let display_name = self.display_name.unwrap_or_default();

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                display_name
                    .split(',')
                    .next()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());

        let country = self
            .address
            .and_then(|a| a.country)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());

        Some(Location {
            name,
            country,
            latitude,
            longitude,
            display_name,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    base_url: String,
    http: Client,
}

impl Geocoder {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client(user_agent)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.endpoints.geocoder, &config.endpoints.user_agent)
    }

    /// Resolve a free-text query. `Ok(None)` when nothing matches.
    pub async fn forward_geocode(&self, query: &str) -> Result<Option<Location>> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, query, "forward geocoding");

        let res = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        let body = read_success_body(SERVICE, res).await?;
        let places: Vec<NominatimPlace> = parse_json(SERVICE, &body)?;

        let location = places.into_iter().next().and_then(NominatimPlace::into_location);
        if let Some(loc) = &location {
            tracing::info!(name = %loc.name, country = %loc.country, "geocoded query");
        }
        Ok(location)
    }

    /// Resolve coordinates to a place. `Ok(None)` when the service cannot.
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Option<Location>> {
        let url = format!("{}/reverse", self.base_url);
        tracing::debug!(%url, lat, lon, "reverse geocoding");

        let lat = lat.to_string();
        let lon = lon.to_string();
        let res = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str()), ("format", "json")])
            .send()
            .await?;

        let body = read_success_body(SERVICE, res).await?;
        // An unresolvable point can come back as `null` rather than an error object.
        let place: Option<NominatimPlace> = parse_json(SERVICE, &body)?;

        let location = place.and_then(NominatimPlace::into_location);
        if let Some(loc) = &location {
            tracing::info!(name = %loc.name, country = %loc.country, "reverse geocoded");
        }
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const UA: &str = "weatherwise-tests/1.0";

    async fn geocoder(server: &MockServer) -> Geocoder {
        Geocoder::new(&server.uri(), UA).unwrap()
    }

    #[tokio::test]
    async fn forward_geocode_returns_first_match() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Oslo"))
            .and(query_param("format", "json"))
            .and(query_param("limit", "1"))
            .and(header("user-agent", UA))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "lat": "59.9133301",
                    "lon": "10.7389701",
                    "name": "Oslo",
                    "display_name": "Oslo, Norway",
                    "address": { "city": "Oslo", "country": "Norway" }
                }
            ])))
            .mount(&mock_server)
            .await;

        let loc = geocoder(&mock_server).await.forward_geocode("Oslo").await.unwrap().unwrap();

        assert_eq!(loc.name, "Oslo");
        assert_eq!(loc.country, "Norway");
        assert_eq!(loc.latitude, 59.9133301);
        assert_eq!(loc.longitude, 10.7389701);
        assert_eq!(loc.label(), LocationLabel::new("Oslo", "Norway"));
    }

    #[tokio::test]
    async fn forward_geocode_without_results_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let result = geocoder(&mock_server).await.forward_geocode("Atlantis").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn missing_name_falls_back_to_display_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "lat": 48.85, "lon": 2.35, "name": "", "display_name": "Paris, Ile-de-France, France" }
            ])))
            .mount(&mock_server)
            .await;

        let loc = geocoder(&mock_server).await.forward_geocode("paris").await.unwrap().unwrap();
        assert_eq!(loc.name, "Paris");
        assert_eq!(loc.country, "Unknown");
    }

    #[tokio::test]
    async fn reverse_geocode_resolves_coordinates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("lat", "59.9"))
            .and(query_param("lon", "10.75"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "lat": "59.9001",
                "lon": "10.7502",
                "name": "Sentrum",
                "display_name": "Sentrum, Oslo, Norway",
                "address": { "country": "Norway" }
            })))
            .mount(&mock_server)
            .await;

        let loc = geocoder(&mock_server).await.reverse_geocode(59.9, 10.75).await.unwrap().unwrap();
        assert_eq!(loc.name, "Sentrum");
        assert_eq!(loc.country, "Norway");
    }

    #[tokio::test]
    async fn reverse_geocode_unresolvable_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "Unable to geocode" })),
            )
            .mount(&mock_server)
            .await;

        let result = geocoder(&mock_server).await.reverse_geocode(0.0, -160.0).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn reverse_geocode_null_body_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let result = geocoder(&mock_server).await.reverse_geocode(1.0, 1.0).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn server_errors_propagate() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = geocoder(&mock_server).await.forward_geocode("Oslo").await.unwrap_err();
        assert!(matches!(err, WeatherError::Status { .. }));
    }

    #[tokio::test]
    async fn malformed_json_propagates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ truncated"))
            .mount(&mock_server)
            .await;

        let err = geocoder(&mock_server).await.reverse_geocode(1.0, 1.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::Parse { .. }));
    }
}
