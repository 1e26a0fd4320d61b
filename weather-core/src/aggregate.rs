//! Groups hourly observations into calendar days and computes per-day aggregates.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::model::Observation;
use crate::symbol::DEFAULT_SYMBOL;

/// Number of calendar days kept in the forecast.
pub const FORECAST_DAYS: usize = 3;
/// Maximum number of observations projected into a day's hourly detail.
pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_temp_c: f64,
    /// Provider units (m/s).
    pub max_wind_speed: f64,
    pub total_precip_mm: f64,
    pub dominant_symbol: String,
    pub max_uv: f64,
    pub avg_humidity: f64,
    pub chance_of_rain: f64,
}

/// A retained day: its aggregate plus the observations shown hour by hour.
#[derive(Debug, Clone)]
pub struct DayBucket<'a> {
    pub aggregate: DayAggregate,
    pub hours: Vec<&'a Observation>,
}

/// Partition observations by the calendar date of their timestamp.
pub fn group_by_day(observations: &[Observation]) -> BTreeMap<NaiveDate, Vec<&Observation>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Observation>> = BTreeMap::new();
    for obs in observations {
        days.entry(obs.time.date_naive()).or_default().push(obs);
    }
    days
}

/// Most frequent symbol; on a tie the symbol whose last occurrence comes latest wins.
pub fn dominant_symbol<'a, I>(symbols: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, symbol) in symbols.into_iter().enumerate() {
        let entry = stats.entry(symbol).or_insert((0, idx));
        entry.0 += 1;
        entry.1 = idx;
    }

    stats
        .into_iter()
        .max_by_key(|(_, (count, last_seen))| (*count, *last_seen))
        .map(|(symbol, _)| symbol)
}

/// Arithmetic mean kept inside `[min, max]`; float summation can drift past
/// either bound. NaN for an empty slice.
fn mean_within(values: &[f64], min: f64, max: f64) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if values.is_empty() {
        mean
    } else {
        mean.clamp(min, max)
    }
}

/// Aggregate one day bucket.
///
/// Absent instantaneous fields count as `0.0`. An empty slice yields
/// `-inf`/`+inf` for max/min and NaN averages.
pub fn aggregate_day(date: NaiveDate, observations: &[&Observation]) -> DayAggregate {
    let temps: Vec<f64> = observations
        .iter()
        .map(|o| o.details().air_temperature.unwrap_or(0.0))
        .collect();

    let max_temp_c = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_temp_c = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let avg_temp_c = mean_within(&temps, min_temp_c, max_temp_c);

    let total_precip_mm = observations.iter().map(|o| o.next_hour_precipitation()).sum();

    let dominant = dominant_symbol(
        observations
            .iter()
            .map(|o| o.symbol_code().unwrap_or(DEFAULT_SYMBOL)),
    )
    .unwrap_or(DEFAULT_SYMBOL);

    let max_of = |field: fn(&Observation) -> f64| {
        observations
            .iter()
            .map(|o| field(o))
            .fold(f64::NEG_INFINITY, f64::max)
    };

    let humidities: Vec<f64> = observations
        .iter()
        .map(|o| o.details().relative_humidity.unwrap_or(0.0))
        .collect();
    let avg_humidity = mean_within(
        &humidities,
        humidities.iter().copied().fold(f64::INFINITY, f64::min),
        humidities.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );

    DayAggregate {
        date,
        max_temp_c,
        min_temp_c,
        avg_temp_c,
        max_wind_speed: max_of(|o| o.details().wind_speed.unwrap_or(0.0)),
        total_precip_mm,
        dominant_symbol: dominant.to_string(),
        max_uv: max_of(|o| o.details().ultraviolet_index_clear_sky.unwrap_or(0.0)),
        avg_humidity,
        chance_of_rain: max_of(Observation::next_hour_precipitation_probability),
    }
}

/// The first [`FORECAST_DAYS`] days, ascending, each with at most
/// [`HOURS_PER_DAY`] hourly observations in feed order.
pub fn aggregate(observations: &[Observation]) -> Vec<DayBucket<'_>> {
    let days = group_by_day(observations);
    if days.len() > FORECAST_DAYS {
        tracing::debug!(
            total_days = days.len(),
            kept = FORECAST_DAYS,
            "dropping forecast days beyond the retained window"
        );
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, obs)| DayBucket {
            aggregate: aggregate_day(date, &obs),
            hours: obs.into_iter().take(HOURS_PER_DAY).collect(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde_json::json;

    use crate::model::Observation;

    pub fn observation(
        time: DateTime<Utc>,
        temp: Option<f64>,
        symbol: Option<&str>,
        precip: f64,
        probability: f64,
    ) -> Observation {
        let mut data = json!({
            "instant": { "details": {
                "air_temperature": temp,
                "relative_humidity": 70.0,
                "wind_speed": 3.0,
                "wind_from_direction": 180.0,
                "air_pressure_at_sea_level": 1012.0,
                "cloud_area_fraction": 20.0,
                "ultraviolet_index_clear_sky": 1.5
            } }
        });
        if let Some(symbol) = symbol {
            data["next_1_hours"] = json!({
                "summary": { "symbol_code": symbol },
                "details": {
                    "precipitation_amount": precip,
                    "probability_of_precipitation": probability
                }
            });
        }
        serde_json::from_value(json!({ "time": time, "data": data }))
            .expect("fixture observation should deserialize")
    }

    /// `hours` consecutive hourly observations starting at midnight UTC on 2024-06-01.
    pub fn hourly_series(hours: usize, symbol: &str) -> Vec<Observation> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        (0..hours)
            .map(|h| {
                let temp = 10.0 + (h % 24) as f64 * 0.5;
                observation(start + Duration::hours(h as i64), Some(temp), Some(symbol), 0.1, 10.0)
            })
            .collect()
    }
}
