use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;

use crate::{Config, error::Result, model::ForecastPayload, provider::metno::MetNoProvider};

pub mod metno;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// A source of raw forecast time series.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    async fn fetch_timeseries(&self, lat: f64, lon: f64) -> Result<ForecastPayload>;
}

/// HTTP client shared by the upstream adapters: fixed timeout, identifying User-Agent.
pub(crate) fn http_client(user_agent: &str) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Construct the weather provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    let provider = MetNoProvider::new(&config.endpoints.weather, &config.endpoints.user_agent)?;
    Ok(Box::new(provider))
}
