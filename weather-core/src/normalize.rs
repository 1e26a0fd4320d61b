//! Assembles the normalized weather schema from a provider payload.
//!
//! Absent instantaneous fields are read as `0.0`: a partially filled
//! response is preferred over no response.

use chrono::{DateTime, Timelike, Utc};

use crate::aggregate::{self, DayAggregate, DayBucket};
use crate::error::{Result, WeatherError};
use crate::model::{
    CurrentWeather, DaySummary, Forecast, ForecastDay, ForecastPayload, HourForecast,
    LocationInfo, NormalizedWeatherResponse, Observation,
};
use crate::symbol::{DEFAULT_SYMBOL, map_symbol};
use crate::units::{
    celsius_to_fahrenheit, kmh_to_mph, mb_to_inhg, mm_to_inches, mps_to_kmh, round_half_up,
    wind_direction,
};

const WIND_CHILL_MAX_TEMP_C: f64 = 10.0;
const WIND_CHILL_MIN_WIND: f64 = 4.8;

/// Display name and country attached to a normalized response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationLabel {
    pub name: String,
    pub country: String,
}

impl LocationLabel {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }
}

impl Default for LocationLabel {
    fn default() -> Self {
        Self::new("Unknown Location", "Unknown")
    }
}

/// Wind-chill "feels like" temperature. `wind_speed` is in provider units.
pub fn feels_like(temp_c: f64, wind_speed: f64) -> f64 {
    if temp_c <= WIND_CHILL_MAX_TEMP_C && wind_speed > WIND_CHILL_MIN_WIND {
        let v = wind_speed.powf(0.16);
        round_half_up(13.12 + 0.6215 * temp_c - 11.37 * v + 0.3965 * temp_c * v)
    } else {
        temp_c
    }
}

/// Daytime by the UTC hour of the timestamp; the feed carries no local offset.
pub fn is_day(time: DateTime<Utc>) -> bool {
    (6..=18).contains(&time.hour())
}

pub fn normalize(payload: &ForecastPayload, label: &LocationLabel) -> Result<NormalizedWeatherResponse> {
    let timeseries = &payload.properties.timeseries;
    let first = timeseries.first().ok_or(WeatherError::NoData)?;

    let (lat, lon) = payload.coordinates().unwrap_or((0.0, 0.0));
    let location = LocationInfo {
        name: label.name.clone(),
        country: label.country.clone(),
        lat,
        lon,
        localtime_epoch: first.time.timestamp(),
        localtime: first.time,
    };

    let forecastday = aggregate::aggregate(timeseries)
        .iter()
        .map(forecast_day)
        .collect();

    Ok(NormalizedWeatherResponse {
        location,
        current: current_weather(first),
        forecast: Forecast { forecastday },
    })
}

fn current_weather(obs: &Observation) -> CurrentWeather {
    let d = obs.details();
    let temp_c = d.air_temperature.unwrap_or(0.0);
    let wind = d.wind_speed.unwrap_or(0.0);
    let wind_kph = mps_to_kmh(wind);
    let gust_kph = mps_to_kmh(d.wind_speed_of_gust.unwrap_or(0.0));
    let degree = d.wind_from_direction.unwrap_or(0.0);
    let pressure = d.air_pressure_at_sea_level.unwrap_or(0.0);
    let precip = obs.next_hour_precipitation();
    let feels = feels_like(temp_c, wind);

    CurrentWeather {
        last_updated_epoch: obs.time.timestamp(),
        last_updated: obs.time,
        temp_c,
        temp_f: celsius_to_fahrenheit(temp_c),
        is_day: is_day(obs.time),
        condition: map_symbol(obs.symbol_code().unwrap_or(DEFAULT_SYMBOL)),
        wind_kph,
        wind_mph: kmh_to_mph(wind_kph),
        wind_degree: degree,
        wind_dir: wind_direction(degree).to_string(),
        pressure_mb: pressure,
        pressure_in: mb_to_inhg(pressure),
        precip_mm: precip,
        precip_in: mm_to_inches(precip),
        humidity: d.relative_humidity.unwrap_or(0.0),
        cloud: d.cloud_area_fraction.unwrap_or(0.0),
        feelslike_c: feels,
        feelslike_f: celsius_to_fahrenheit(feels),
        uv: d.ultraviolet_index_clear_sky.unwrap_or(0.0),
        gust_kph,
        gust_mph: kmh_to_mph(gust_kph),
    }
}

fn hour_forecast(obs: &Observation) -> HourForecast {
    let d = obs.details();
    let temp_c = d.air_temperature.unwrap_or(0.0);
    let wind = d.wind_speed.unwrap_or(0.0);
    let wind_kph = mps_to_kmh(wind);
    let gust_kph = mps_to_kmh(d.wind_speed_of_gust.unwrap_or(0.0));
    let degree = d.wind_from_direction.unwrap_or(0.0);
    let pressure = d.air_pressure_at_sea_level.unwrap_or(0.0);
    let precip = obs.next_hour_precipitation();
    let dewpoint = d.dew_point_temperature.unwrap_or(0.0);
    let feels = feels_like(temp_c, wind);

    HourForecast {
        time_epoch: obs.time.timestamp(),
        time: obs.time,
        temp_c,
        temp_f: celsius_to_fahrenheit(temp_c),
        is_day: is_day(obs.time),
        condition: map_symbol(obs.symbol_code().unwrap_or(DEFAULT_SYMBOL)),
        wind_kph,
        wind_mph: kmh_to_mph(wind_kph),
        wind_degree: degree,
        wind_dir: wind_direction(degree).to_string(),
        pressure_mb: pressure,
        pressure_in: mb_to_inhg(pressure),
        precip_mm: precip,
        precip_in: mm_to_inches(precip),
        humidity: d.relative_humidity.unwrap_or(0.0),
        cloud: d.cloud_area_fraction.unwrap_or(0.0),
        feelslike_c: feels,
        feelslike_f: celsius_to_fahrenheit(feels),
        dewpoint_c: dewpoint,
        dewpoint_f: celsius_to_fahrenheit(dewpoint),
        will_it_rain: precip > 0.0,
        chance_of_rain: obs.next_hour_precipitation_probability(),
        gust_kph,
        gust_mph: kmh_to_mph(gust_kph),
        uv: d.ultraviolet_index_clear_sky.unwrap_or(0.0),
    }
}

fn day_summary(agg: &DayAggregate) -> DaySummary {
    let maxwind_kph = mps_to_kmh(agg.max_wind_speed);

    DaySummary {
        maxtemp_c: agg.max_temp_c,
        maxtemp_f: celsius_to_fahrenheit(agg.max_temp_c),
        mintemp_c: agg.min_temp_c,
        mintemp_f: celsius_to_fahrenheit(agg.min_temp_c),
        avgtemp_c: agg.avg_temp_c,
        avgtemp_f: celsius_to_fahrenheit(agg.avg_temp_c),
        maxwind_kph,
        maxwind_mph: kmh_to_mph(maxwind_kph),
        totalprecip_mm: agg.total_precip_mm,
        totalprecip_in: mm_to_inches(agg.total_precip_mm),
        avghumidity: agg.avg_humidity,
        daily_will_it_rain: agg.total_precip_mm > 0.0,
        daily_chance_of_rain: agg.chance_of_rain,
        condition: map_symbol(&agg.dominant_symbol),
        uv: agg.max_uv,
    }
}

fn forecast_day(bucket: &DayBucket<'_>) -> ForecastDay {
    let date = bucket.aggregate.date;
    ForecastDay {
        date,
        date_epoch: date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp(),
        day: day_summary(&bucket.aggregate),
        hour: bucket.hours.iter().map(|obs| hour_forecast(obs)).collect(),
    }
}
