//! Unit conversions used when projecting provider data into the normalized schema.

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Round to the nearest integer, halves towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a fixed number of decimals (half-up).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round_half_up(celsius * 9.0 / 5.0 + 32.0)
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    round_half_up(kmh * 0.621371)
}

pub fn mps_to_kmh(mps: f64) -> f64 {
    round_to(mps * 3.6, 1)
}

pub fn mb_to_inhg(mb: f64) -> f64 {
    round_to(mb * 0.02953, 2)
}

pub fn mm_to_inches(mm: f64) -> f64 {
    round_to(mm * 0.0393701, 2)
}

/// 16-point compass direction for a meteorological "wind from" bearing.
pub fn wind_direction(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = (round_half_up(normalized / 22.5) as usize) % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}
