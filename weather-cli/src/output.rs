//! Human-readable terminal rendering.

use weatherwise_core::{
    Dashboard, Location, NormalizedWeatherResponse, PanelState,
    alerts::Severity,
    model::{CurrentWeather, DaySummary},
    suggestions::icon_for_condition,
};

use crate::cli::Units;

struct Reading {
    temp: f64,
    feels_like: f64,
    wind: f64,
    precip: f64,
}

impl Reading {
    fn current(current: &CurrentWeather, units: Units) -> Self {
        match units {
            Units::Metric => Self {
                temp: current.temp_c,
                feels_like: current.feelslike_c,
                wind: current.wind_kph,
                precip: current.precip_mm,
            },
            Units::Imperial => Self {
                temp: current.temp_f,
                feels_like: current.feelslike_f,
                wind: current.wind_mph,
                precip: current.precip_in,
            },
        }
    }
}

fn labels(units: Units) -> (&'static str, &'static str, &'static str) {
    match units {
        Units::Metric => ("°C", "km/h", "mm"),
        Units::Imperial => ("°F", "mph", "in"),
    }
}

fn day_range(day: &DaySummary, units: Units) -> (f64, f64, f64) {
    match units {
        Units::Metric => (day.mintemp_c, day.maxtemp_c, day.totalprecip_mm),
        Units::Imperial => (day.mintemp_f, day.maxtemp_f, day.totalprecip_in),
    }
}

pub fn print_location(location: &Location) {
    println!("{}, {}", location.name, location.country);
    println!("  {:.4}, {:.4}", location.latitude, location.longitude);
    if !location.display_name.is_empty() {
        println!("  {}", location.display_name);
    }
}

pub fn print_weather(response: &NormalizedWeatherResponse, units: Units) {
    let (temp_unit, wind_unit, precip_unit) = labels(units);
    let current = &response.current;
    let now = Reading::current(current, units);

    println!("{}, {}", response.location.name, response.location.country);
    println!(
        "{} {}  {:.0}{temp_unit} (feels like {:.0}{temp_unit})",
        icon_for_condition(&current.condition.text).glyph(),
        current.condition.text,
        now.temp,
        now.feels_like,
    );
    println!(
        "  Wind {:.0} {wind_unit} {}  Humidity {:.0}%  Precip {:.1} {precip_unit}  UV {:.0}",
        now.wind, current.wind_dir, current.humidity, now.precip, current.uv,
    );

    println!();
    for day in &response.forecast.forecastday {
        let (low, high, precip) = day_range(&day.day, units);
        println!(
            "  {}  {:<28} {:>4.0}{temp_unit} / {:>4.0}{temp_unit}  {:>3.0}% rain  {:.1} {precip_unit}",
            day.date.format("%a %d %b"),
            day.day.condition.text,
            high,
            low,
            day.day.daily_chance_of_rain,
            precip,
        );
    }
}

fn print_panel<T>(title: &str, state: &PanelState<T>, render: impl FnOnce(&T)) {
    println!();
    println!("{title}");
    match state {
        PanelState::Ready(value) => render(value),
        PanelState::Unavailable(msg) => println!("  (unavailable) {msg}"),
        PanelState::Failed(msg) => println!("  (failed) {msg}"),
    }
}

pub fn print_dashboard(dashboard: &Dashboard) {
    println!();
    println!("{}", dashboard.summary);

    if !dashboard.alerts.is_empty() {
        println!();
        println!("Alerts");
        for alert in &dashboard.alerts {
            let marker = match alert.severity {
                Severity::Critical | Severity::High => "!!",
                Severity::Medium => "! ",
                Severity::Low => "  ",
            };
            println!("  {marker} {}: {}", alert.title, alert.description);
        }
    }

    print_panel("Day plan", &dashboard.day_plan, |advice| println!("  {advice}"));
    print_panel("Weather story", &dashboard.story, |story| println!("  {story}"));

    println!();
    println!("What to wear");
    for s in &dashboard.clothing {
        println!("  {} {}", s.icon.glyph(), s.item);
    }

    println!();
    println!("What to eat");
    for s in &dashboard.food {
        println!("  {} {}", s.icon.glyph(), s.item);
    }

    println!();
    println!("Health tips");
    for tip in &dashboard.medical {
        println!("  {} [{}] {}", tip.icon.glyph(), tip.category.as_str(), tip.tip);
    }

    print_panel("Air quality", &dashboard.air_quality, |reading| {
        println!("  AQI {} ({})", reading.aqi, reading.category.label());
        println!("  {}", reading.category.health_concern());
        println!("  {}", reading.category.recommendation());
    });

    print_panel("Music", &dashboard.music, |query| println!("  Search: {query}"));
    print_panel("Map", &dashboard.map, |link| println!("  {link}"));

    println!();
    println!("Emergency");
    for contact in &dashboard.emergency {
        println!("  {}: {}", contact.label, contact.href);
    }
}
