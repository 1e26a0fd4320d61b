//! Weather alerts derived from the first forecast day and the current reading.

use serde::Serialize;

use crate::model::NormalizedWeatherResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Storm,
    Heat,
    Cold,
    Rain,
    Wind,
    Fog,
    Snow,
    Lightning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl WeatherAlert {
    fn new(kind: AlertKind, severity: Severity, title: &str, description: String) -> Self {
        Self {
            kind,
            severity,
            title: title.to_string(),
            description,
        }
    }
}

/// Alerts for today, most severe first. Empty when there is no forecast day.
pub fn derive_alerts(response: &NormalizedWeatherResponse) -> Vec<WeatherAlert> {
    let Some(today) = response.forecast.forecastday.first() else {
        return Vec::new();
    };
    let day = &today.day;

    let mut conditions: Vec<String> = vec![
        response.current.condition.text.to_lowercase(),
        day.condition.text.to_lowercase(),
    ];
    conditions.extend(today.hour.iter().map(|h| h.condition.text.to_lowercase()));
    let mentions = |word: &str| conditions.iter().any(|c| c.contains(word));

    let mut alerts = Vec::new();

    if mentions("thunder") {
        alerts.push(WeatherAlert::new(
            AlertKind::Lightning,
            Severity::High,
            "Thunderstorm Warning",
            "Thunderstorms expected today. Avoid open areas and stay away from tall objects."
                .to_string(),
        ));
    }

    if day.totalprecip_mm >= 20.0 {
        alerts.push(WeatherAlert::new(
            AlertKind::Rain,
            Severity::High,
            "Heavy Rainfall Warning",
            format!(
                "About {:.0} mm of rain expected. Possible flooding in low-lying areas.",
                day.totalprecip_mm
            ),
        ));
    } else if day.totalprecip_mm >= 10.0 || day.daily_chance_of_rain >= 80.0 {
        alerts.push(WeatherAlert::new(
            AlertKind::Rain,
            Severity::Medium,
            "Rainfall Advisory",
            format!(
                "{:.0}% chance of rain with about {:.0} mm expected.",
                day.daily_chance_of_rain, day.totalprecip_mm
            ),
        ));
    }

    let wind_severity = match day.maxwind_kph {
        w if w >= 75.0 => Some(Severity::Critical),
        w if w >= 60.0 => Some(Severity::High),
        w if w >= 40.0 => Some(Severity::Medium),
        _ => None,
    };
    if let Some(severity) = wind_severity {
        alerts.push(WeatherAlert::new(
            if severity == Severity::Critical { AlertKind::Storm } else { AlertKind::Wind },
            severity,
            "Strong Wind Advisory",
            format!(
                "Wind speeds up to {:.0} km/h expected. Secure loose objects outdoors.",
                day.maxwind_kph
            ),
        ));
    }

    let heat_severity = match day.maxtemp_c {
        t if t >= 40.0 => Some(Severity::Critical),
        t if t >= 35.0 => Some(Severity::High),
        _ => None,
    };
    if let Some(severity) = heat_severity {
        alerts.push(WeatherAlert::new(
            AlertKind::Heat,
            severity,
            "Heat Warning",
            format!("Temperatures up to {:.0}°C. Stay hydrated and avoid midday sun.", day.maxtemp_c),
        ));
    }

    let cold_severity = match day.mintemp_c {
        t if t <= -20.0 => Some(Severity::Critical),
        t if t <= -10.0 => Some(Severity::High),
        _ => None,
    };
    if let Some(severity) = cold_severity {
        alerts.push(WeatherAlert::new(
            AlertKind::Cold,
            severity,
            "Extreme Cold Warning",
            format!("Temperatures down to {:.0}°C. Limit time outdoors.", day.mintemp_c),
        ));
    }

    if mentions("heavy snow") {
        alerts.push(WeatherAlert::new(
            AlertKind::Snow,
            Severity::High,
            "Heavy Snow Warning",
            "Heavy snowfall expected. Travel may be difficult.".to_string(),
        ));
    } else if mentions("snow") {
        alerts.push(WeatherAlert::new(
            AlertKind::Snow,
            Severity::Low,
            "Snow Advisory",
            "Snow expected today. Watch for slippery roads.".to_string(),
        ));
    }

    if mentions("fog") {
        alerts.push(WeatherAlert::new(
            AlertKind::Fog,
            Severity::Low,
            "Fog Advisory",
            "Reduced visibility expected. Drive with care.".to_string(),
        ));
    }

    alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
    alerts
}
