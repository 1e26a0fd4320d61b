//! Template-driven text built from the normalized schema: day-plan advice,
//! a short summary and a weather story.

use chrono::Timelike;
use serde::Serialize;

use crate::model::NormalizedWeatherResponse;

const RAIN_HOUR_THRESHOLD: f64 = 50.0;
const RAIN_DAY_THRESHOLD: f64 = 50.0;
const HIGH_UV: f64 = 6.0;
const VERY_COLD_C: f64 = 5.0;
const VERY_HOT_C: f64 = 30.0;

/// Facts the day planner works from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlanInput {
    pub location_name: String,
    pub current_temp_c: f64,
    pub current_condition: String,
    pub feels_like_c: f64,
    pub humidity: f64,
    pub wind_kph: f64,
    pub uv_index: f64,
    pub today_max_c: f64,
    pub today_min_c: f64,
    pub today_condition: String,
    pub chance_of_rain_today: f64,
    /// e.g. "around 16:00"
    pub expected_rain_time: Option<String>,
}

impl DayPlanInput {
    /// `None` when the response carries no forecast day to plan against.
    pub fn from_response(response: &NormalizedWeatherResponse, now_hour: u32) -> Option<Self> {
        let today = response.forecast.forecastday.first()?;
        let current = &response.current;

        let expected_rain_time = today
            .hour
            .iter()
            .find(|h| h.chance_of_rain > RAIN_HOUR_THRESHOLD && h.time.hour() >= now_hour)
            .map(|h| format!("around {:02}:00", h.time.hour()));

        Some(Self {
            location_name: response.location.name.clone(),
            current_temp_c: current.temp_c,
            current_condition: current.condition.text.clone(),
            feels_like_c: current.feelslike_c,
            humidity: current.humidity,
            wind_kph: current.wind_kph,
            uv_index: current.uv,
            today_max_c: today.day.maxtemp_c,
            today_min_c: today.day.mintemp_c,
            today_condition: today.day.condition.text.clone(),
            chance_of_rain_today: today.day.daily_chance_of_rain,
            expected_rain_time,
        })
    }
}

/// One actionable sentence, picked by the most pressing aspect of the day.
pub fn day_plan_advice(input: &DayPlanInput) -> String {
    if input.chance_of_rain_today >= RAIN_DAY_THRESHOLD {
        return match &input.expected_rain_time {
            Some(time) => format!("Carry an umbrella; rain expected {time}."),
            None => format!(
                "Carry an umbrella; there is a {:.0}% chance of rain today.",
                input.chance_of_rain_today
            ),
        };
    }

    if input.uv_index >= HIGH_UV {
        return format!(
            "High UV levels ({:.0}) today; limit sun exposure between 10 AM and 4 PM and use sunscreen.",
            input.uv_index
        );
    }

    if input.current_temp_c <= VERY_COLD_C {
        return format!(
            "It's quite cold ({:.0}°C). Dress in warm layers if heading out.",
            input.current_temp_c
        );
    }

    if input.today_max_c >= VERY_HOT_C {
        return format!(
            "Expect a hot day (up to {:.0}°C). Stay hydrated and avoid strenuous outdoor activity during peak heat.",
            input.today_max_c
        );
    }

    format!("Looks like a pleasant day in {}! Enjoy.", input.location_name)
}

pub fn weather_summary(response: &NormalizedWeatherResponse) -> String {
    let current = &response.current;
    let mut summary = format!(
        "{} in {} at {:.0}°C (feels like {:.0}°C), humidity {:.0}%, wind {:.0} km/h {}.",
        current.condition.text,
        response.location.name,
        current.temp_c,
        current.feelslike_c,
        current.humidity,
        current.wind_kph,
        current.wind_dir,
    );

    if let Some(today) = response.forecast.forecastday.first() {
        summary.push_str(&format!(
            " Today: {}, high {:.0}°C, low {:.0}°C, {:.0}% chance of rain.",
            today.day.condition.text,
            today.day.maxtemp_c,
            today.day.mintemp_c,
            today.day.daily_chance_of_rain,
        ));
    }

    summary
}

/// A short whimsical story for the current weather, picked by condition.
pub fn weather_story(location: &str, condition: &str, temp_c: f64) -> String {
    let condition = condition.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| condition.contains(w));

    if mentions(&["snow", "sleet", "blizzard"]) {
        format!(
            "Winter fairies visited {location} last night, blanketing everything in sparkling white dust. \
             The town looks like a giant frosted cake, waiting for snowmen to come alive!"
        )
    } else if mentions(&["rain", "drizzle", "showers"]) {
        format!(
            "The clouds over {location} are like giant watering cans, giving all the plants a refreshing drink. \
             Little puddles turn into tiny mirrors, reflecting the sky's soft grey blanket."
        )
    } else if mentions(&["wind", "breez", "gale"]) {
        format!(
            "A playful breeze swept through {location}, whispering secrets to the trees. \
             Leaves twirl and cartwheel, enjoying their airy ballet in the {temp_c:.0}°C weather."
        )
    } else if mentions(&["sunny", "clear", "fair"]) {
        format!(
            "In {location}, the sun decided to throw a golden party today! \
             Fluffy clouds dance in the sky, playing hide-and-seek with the sunbeams at {temp_c:.0}°C."
        )
    } else {
        format!(
            "A quiet sky settled over {location} today, wrapped in its favourite {condition} coat. \
             At {temp_c:.0}°C, the whole town is waiting to see what the clouds will do next."
        )
    }
}
