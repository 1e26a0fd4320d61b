//! Provider payload types and the normalized weather schema.
//!
//! The `Forecast*`/`Observation*` types mirror the MET Norway
//! `locationforecast/2.0/compact` JSON. Everything below the
//! "normalized schema" marker is what the rest of the application consumes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::symbol::NormalizedCondition;

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    pub properties: ForecastProperties,
}

impl ForecastPayload {
    /// `(latitude, longitude)` from the GeoJSON point, if present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let coords = &self.geometry.as_ref()?.coordinates;
        match coords.as_slice() {
            [lon, lat, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// GeoJSON order: longitude, latitude, altitude.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub timeseries: Vec<Observation>,
}

/// One timestamped reading from the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub time: DateTime<Utc>,
    pub data: ObservationData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationData {
    #[serde(default)]
    pub instant: Instant,
    #[serde(default)]
    pub next_1_hours: Option<NextHours>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Instant {
    #[serde(default)]
    pub details: InstantDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstantDetails {
    pub air_pressure_at_sea_level: Option<f64>,
    pub air_temperature: Option<f64>,
    pub cloud_area_fraction: Option<f64>,
    pub dew_point_temperature: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub ultraviolet_index_clear_sky: Option<f64>,
    pub wind_from_direction: Option<f64>,
    /// Metres per second.
    pub wind_speed: Option<f64>,
    pub wind_speed_of_gust: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextHours {
    #[serde(default)]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub details: NextHoursDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    pub symbol_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextHoursDetails {
    pub precipitation_amount: Option<f64>,
    pub probability_of_precipitation: Option<f64>,
}

impl Observation {
    pub fn details(&self) -> &InstantDetails {
        &self.data.instant.details
    }

    pub fn symbol_code(&self) -> Option<&str> {
        self.data
            .next_1_hours
            .as_ref()?
            .summary
            .as_ref()
            .map(|s| s.symbol_code.as_str())
    }

    pub fn next_hour_precipitation(&self) -> f64 {
        self.data
            .next_1_hours
            .as_ref()
            .and_then(|n| n.details.precipitation_amount)
            .unwrap_or(0.0)
    }

    pub fn next_hour_precipitation_probability(&self) -> f64 {
        self.data
            .next_1_hours
            .as_ref()
            .and_then(|n| n.details.probability_of_precipitation)
            .unwrap_or(0.0)
    }
}

// ---- normalized schema ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeatherResponse {
    pub location: LocationInfo,
    pub current: CurrentWeather,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub localtime_epoch: i64,
    pub localtime: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub last_updated_epoch: i64,
    pub last_updated: DateTime<Utc>,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: bool,
    pub condition: NormalizedCondition,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub wind_degree: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub uv: f64,
    pub gust_kph: f64,
    pub gust_mph: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub date_epoch: i64,
    pub day: DaySummary,
    pub hour: Vec<HourForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub maxwind_kph: f64,
    pub maxwind_mph: f64,
    pub totalprecip_mm: f64,
    pub totalprecip_in: f64,
    pub avghumidity: f64,
    pub daily_will_it_rain: bool,
    pub daily_chance_of_rain: f64,
    pub condition: NormalizedCondition,
    pub uv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    pub time_epoch: i64,
    pub time: DateTime<Utc>,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: bool,
    pub condition: NormalizedCondition,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub wind_degree: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub dewpoint_c: f64,
    pub dewpoint_f: f64,
    pub will_it_rain: bool,
    pub chance_of_rain: f64,
    pub gust_kph: f64,
    pub gust_mph: f64,
    pub uv: f64,
}
