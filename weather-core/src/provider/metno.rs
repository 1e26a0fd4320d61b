//! MET Norway `locationforecast/2.0` client. No API key; requires a User-Agent.

use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};

use crate::{
    error::{Result, parse_json, read_success_body},
    model::ForecastPayload,
    units::round_to,
};

use super::{WeatherProvider, http_client};

const SERVICE: &str = "MET Norway";

#[derive(Debug, Clone)]
pub struct MetNoProvider {
    base_url: String,
    http: Client,
}

impl MetNoProvider {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client(user_agent)?,
        })
    }
}

#[async_trait]
impl WeatherProvider for MetNoProvider {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn fetch_timeseries(&self, lat: f64, lon: f64) -> Result<ForecastPayload> {
        let url = format!("{}/compact", self.base_url);
        // The API rejects coordinates with more than four decimals.
        let lat = round_to(lat, 4).to_string();
        let lon = round_to(lon, 4).to_string();

        tracing::debug!(%url, %lat, %lon, "fetching forecast time series");

        let res = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await?;

        let body = read_success_body(SERVICE, res).await?;
        let payload: ForecastPayload = parse_json(SERVICE, &body)?;

        tracing::debug!(
            observations = payload.properties.timeseries.len(),
            "forecast time series received"
        );
        Ok(payload)
    }
}
