use anyhow::{Context, anyhow, bail};
use chrono::{Timelike, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Password, PasswordDisplayMode};
use weatherwise_core::{
    Config, Dashboard, NormalizedWeatherResponse, ServiceId, WeatherError, WeatherService,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherwise", version, about = "Weather companion: forecast, alerts and advice")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for an auxiliary service.
    Configure {
        /// Service short name: "aqi", "music", "map" or "ai".
        service: String,
    },

    /// Show the forecast and dashboard for a place or coordinates.
    Show {
        /// Place name, e.g. "Oslo". Omit when passing --lat/--lon.
        query: Option<String>,

        #[arg(long, requires = "lon", conflicts_with = "query", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", conflicts_with = "query", allow_hyphen_values = true)]
        lon: Option<f64>,

        #[arg(long, value_enum, default_value_t = Units::Metric)]
        units: Units,

        /// Print the normalized response and dashboard as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a place name to coordinates.
    Geocode { query: String },

    /// Resolve coordinates to a place name.
    Reverse {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
}

impl Cli {
    pub async fn run(self, mut config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { service } => {
                let id = ServiceId::try_from(service.as_str())?;
                let key = Password::new(&format!("{} API key:", id.display_name()))
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                if key.trim().is_empty() {
                    bail!("API key must not be empty");
                }

                config.upsert_service_api_key(id, key.trim().to_string());
                config.save()?;
                println!("Saved {} API key to {}", id.display_name(), Config::config_file_path()?.display());
            }

            Command::Show { query, lat, lon, units, json } => {
                let service = WeatherService::from_config(&config)?;

                let response = match (query, lat, lon) {
                    (Some(query), _, _) => match service.for_query(&query).await {
                        Ok(Some(response)) => response,
                        Ok(None) => {
                            println!("Location not found: {query}");
                            return Ok(());
                        }
                        Err(err) => return Err(report(err)),
                    },
                    (None, Some(lat), Some(lon)) => {
                        service.for_coordinates(lat, lon).await.map_err(report)?
                    }
                    _ => bail!("Pass a place name or both --lat and --lon"),
                };

                show(&response, &config, units, json).await?;
            }

            Command::Geocode { query } => {
                let service = WeatherService::from_config(&config)?;
                match service.geocoder().forward_geocode(&query).await.map_err(report)? {
                    Some(location) => output::print_location(&location),
                    None => println!("Location not found: {query}"),
                }
            }

            Command::Reverse { lat, lon } => {
                let service = WeatherService::from_config(&config)?;
                match service.geocoder().reverse_geocode(lat, lon).await.map_err(report)? {
                    Some(location) => output::print_location(&location),
                    None => println!("No place found at {lat}, {lon}"),
                }
            }
        }

        Ok(())
    }
}

async fn show(
    response: &NormalizedWeatherResponse,
    config: &Config,
    units: Units,
    json: bool,
) -> anyhow::Result<()> {
    let dashboard = Dashboard::build(response, config, Utc::now().hour()).await;

    if json {
        let doc = serde_json::json!({ "weather": response, "dashboard": dashboard });
        let text = serde_json::to_string_pretty(&doc).context("Failed to serialize output")?;
        println!("{text}");
    } else {
        output::print_weather(response, units);
        output::print_dashboard(&dashboard);
    }
    Ok(())
}

fn report(err: WeatherError) -> anyhow::Error {
    if err.is_retryable_by_user() {
        tracing::warn!(error = %err, "upstream request failed; check your connection and try again");
    }
    anyhow!(err)
}
