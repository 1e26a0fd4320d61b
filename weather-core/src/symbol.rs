//! Translation of MET Norway symbol codes into normalized conditions.
//!
//! Symbol codes look like `clearsky_day`, `rain`, `rainshowersandthunder_night`.
//! The variant suffix (`_day`, `_night`, `_polartwilight`) only changes the
//! pictogram upstream; every variant of a symbol shares text and code here.

use serde::{Deserialize, Serialize};

const ICON_BASE: &str = "//cdn.weatherapi.com/weather/64x64/day";
const VARIANT_SUFFIXES: [&str; 3] = ["day", "night", "polartwilight"];

/// Symbol used when an observation carries no next-hour summary.
pub const DEFAULT_SYMBOL: &str = "clearsky_day";

/// Provider-agnostic description of the weather condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCondition {
    pub text: String,
    pub icon: String,
    pub code: i32,
}

impl NormalizedCondition {
    pub fn unknown() -> Self {
        Self {
            text: "Unknown".to_string(),
            icon: icon_url("113"),
            code: 1000,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.text == "Unknown"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    ClearSky,
    Fair,
    PartlyCloudy,
    Cloudy,
    Fog,
    LightRain,
    Rain,
    HeavyRain,
    LightSleet,
    Sleet,
    HeavySleet,
    LightSnow,
    Snow,
    HeavySnow,
    LightRainShowers,
    RainShowers,
    HeavyRainShowers,
    LightSleetShowers,
    SleetShowers,
    HeavySleetShowers,
    LightSnowShowers,
    SnowShowers,
    HeavySnowShowers,
    LightRainAndThunder,
    RainAndThunder,
    HeavyRainAndThunder,
    LightSleetAndThunder,
    SleetAndThunder,
    HeavySleetAndThunder,
    LightSnowAndThunder,
    SnowAndThunder,
    HeavySnowAndThunder,
    LightRainShowersAndThunder,
    RainShowersAndThunder,
    HeavyRainShowersAndThunder,
    LightSleetShowersAndThunder,
    SleetShowersAndThunder,
    HeavySleetShowersAndThunder,
    LightSnowShowersAndThunder,
    SnowShowersAndThunder,
    HeavySnowShowersAndThunder,
}

struct ConditionInfo {
    symbol: &'static str,
    text: &'static str,
    icon: &'static str,
    code: i32,
}

const fn info(symbol: &'static str, text: &'static str, icon: &'static str, code: i32) -> ConditionInfo {
    ConditionInfo { symbol, text, icon, code }
}

impl Condition {
    pub const ALL: [Condition; 41] = [
        Condition::ClearSky,
        Condition::Fair,
        Condition::PartlyCloudy,
        Condition::Cloudy,
        Condition::Fog,
        Condition::LightRain,
        Condition::Rain,
        Condition::HeavyRain,
        Condition::LightSleet,
        Condition::Sleet,
        Condition::HeavySleet,
        Condition::LightSnow,
        Condition::Snow,
        Condition::HeavySnow,
        Condition::LightRainShowers,
        Condition::RainShowers,
        Condition::HeavyRainShowers,
        Condition::LightSleetShowers,
        Condition::SleetShowers,
        Condition::HeavySleetShowers,
        Condition::LightSnowShowers,
        Condition::SnowShowers,
        Condition::HeavySnowShowers,
        Condition::LightRainAndThunder,
        Condition::RainAndThunder,
        Condition::HeavyRainAndThunder,
        Condition::LightSleetAndThunder,
        Condition::SleetAndThunder,
        Condition::HeavySleetAndThunder,
        Condition::LightSnowAndThunder,
        Condition::SnowAndThunder,
        Condition::HeavySnowAndThunder,
        Condition::LightRainShowersAndThunder,
        Condition::RainShowersAndThunder,
        Condition::HeavyRainShowersAndThunder,
        Condition::LightSleetShowersAndThunder,
        Condition::SleetShowersAndThunder,
        Condition::HeavySleetShowersAndThunder,
        Condition::LightSnowShowersAndThunder,
        Condition::SnowShowersAndThunder,
        Condition::HeavySnowShowersAndThunder,
    ];

    const fn info(self) -> ConditionInfo {
        use Condition::*;
        match self {
            ClearSky => info("clearsky", "Clear Sky", "113", 1000),
            Fair => info("fair", "Partly Cloudy", "116", 1003),
            PartlyCloudy => info("partlycloudy", "Partly Cloudy", "116", 1003),
            Cloudy => info("cloudy", "Cloudy", "119", 1006),
            Fog => info("fog", "Fog", "248", 1030),
            LightRain => info("lightrain", "Light Rain", "296", 1063),
            Rain => info("rain", "Rain", "302", 1066),
            HeavyRain => info("heavyrain", "Heavy Rain", "308", 1195),
            LightSleet => info("lightsleet", "Light Sleet", "317", 1069),
            Sleet => info("sleet", "Sleet", "320", 1069),
            HeavySleet => info("heavysleet", "Heavy Sleet", "320", 1069),
            LightSnow => info("lightsnow", "Light Snow", "326", 1066),
            Snow => info("snow", "Snow", "332", 1066),
            HeavySnow => info("heavysnow", "Heavy Snow", "338", 1117),
            LightRainShowers => info("lightrainshowers", "Light Rain Showers", "353", 1063),
            RainShowers => info("rainshowers", "Rain Showers", "356", 1066),
            HeavyRainShowers => info("heavyrainshowers", "Heavy Rain Showers", "359", 1195),
            LightSleetShowers => info("lightsleetshowers", "Light Sleet Showers", "362", 1069),
            SleetShowers => info("sleetshowers", "Sleet Showers", "365", 1069),
            HeavySleetShowers => info("heavysleetshowers", "Heavy Sleet Showers", "365", 1069),
            LightSnowShowers => info("lightsnowshowers", "Light Snow Showers", "362", 1066),
            SnowShowers => info("snowshowers", "Snow Showers", "365", 1066),
            HeavySnowShowers => info("heavysnowshowers", "Heavy Snow Showers", "368", 1117),
            LightRainAndThunder => info("lightrainandthunder", "Light Rain with Thunder", "200", 1087),
            RainAndThunder => info("rainandthunder", "Rain with Thunder", "200", 1087),
            HeavyRainAndThunder => info("heavyrainandthunder", "Heavy Rain with Thunder", "200", 1087),
            LightSleetAndThunder => info("lightsleetandthunder", "Light Sleet with Thunder", "200", 1087),
            SleetAndThunder => info("sleetandthunder", "Sleet with Thunder", "200", 1087),
            HeavySleetAndThunder => info("heavysleetandthunder", "Heavy Sleet with Thunder", "200", 1087),
            LightSnowAndThunder => info("lightsnowandthunder", "Light Snow with Thunder", "200", 1087),
            SnowAndThunder => info("snowandthunder", "Snow with Thunder", "200", 1087),
            HeavySnowAndThunder => info("heavysnowandthunder", "Heavy Snow with Thunder", "200", 1087),
            LightRainShowersAndThunder => {
                info("lightrainshowersandthunder", "Light Rain Showers with Thunder", "200", 1087)
            }
            RainShowersAndThunder => {
                info("rainshowersandthunder", "Rain Showers with Thunder", "200", 1087)
            }
            HeavyRainShowersAndThunder => {
                info("heavyrainshowersandthunder", "Heavy Rain Showers with Thunder", "200", 1087)
            }
            LightSleetShowersAndThunder => {
                info("lightsleetshowersandthunder", "Light Sleet Showers with Thunder", "200", 1087)
            }
            SleetShowersAndThunder => {
                info("sleetshowersandthunder", "Sleet Showers with Thunder", "200", 1087)
            }
            HeavySleetShowersAndThunder => {
                info("heavysleetshowersandthunder", "Heavy Sleet Showers with Thunder", "200", 1087)
            }
            LightSnowShowersAndThunder => {
                info("lightsnowshowersandthunder", "Light Snow Showers with Thunder", "200", 1087)
            }
            SnowShowersAndThunder => {
                info("snowshowersandthunder", "Snow Showers with Thunder", "200", 1087)
            }
            HeavySnowShowersAndThunder => {
                info("heavysnowshowersandthunder", "Heavy Snow Showers with Thunder", "200", 1087)
            }
        }
    }

    /// Symbol name without any variant suffix, e.g. `rainshowers`.
    pub fn base_symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn text(self) -> &'static str {
        self.info().text
    }

    pub fn code(self) -> i32 {
        self.info().code
    }

    pub fn icon(self) -> String {
        icon_url(self.info().icon)
    }

    pub fn from_symbol(symbol_code: &str) -> Option<Self> {
        let base = base_symbol(symbol_code)?;
        Self::ALL.iter().copied().find(|c| c.base_symbol() == base)
    }

    pub fn normalized(self) -> NormalizedCondition {
        NormalizedCondition {
            text: self.text().to_string(),
            icon: self.icon(),
            code: self.code(),
        }
    }

    /// The base symbol plus its `_day`/`_night`/`_polartwilight` spellings.
    pub fn symbol_codes(self) -> impl Iterator<Item = String> {
        let base = self.base_symbol();
        std::iter::once(base.to_string())
            .chain(VARIANT_SUFFIXES.iter().map(move |v| format!("{base}_{v}")))
    }
}

/// Map a provider symbol code to a normalized condition. Never fails.
pub fn map_symbol(symbol_code: &str) -> NormalizedCondition {
    Condition::from_symbol(symbol_code)
        .map(Condition::normalized)
        .unwrap_or_else(NormalizedCondition::unknown)
}

fn icon_url(id: &str) -> String {
    format!("{ICON_BASE}/{id}.png")
}

/// Strip variant suffixes. The older `<name>_<variant>_thunder` spelling is
/// folded into the current `<name>andthunder` one.
fn base_symbol(symbol_code: &str) -> Option<String> {
    let lower = symbol_code.trim().to_ascii_lowercase();
    let parts: Vec<&str> = lower
        .split('_')
        .filter(|p| !p.is_empty() && !VARIANT_SUFFIXES.contains(p))
        .collect();

    match parts.as_slice() {
        [name] => Some((*name).to_string()),
        [name, "thunder"] => Some(format!("{name}andthunder")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_sky_variants_share_text_and_code() {
        for code in ["clearsky_day", "clearsky_night", "clearsky_polartwilight"] {
            let c = map_symbol(code);
            assert_eq!(c.text, "Clear Sky");
            assert_eq!(c.code, 1000);
            assert_eq!(c.icon, "//cdn.weatherapi.com/weather/64x64/day/113.png");
        }
    }

    #[test]
    fn every_known_symbol_maps_to_a_condition() {
        for condition in Condition::ALL {
            for code in condition.symbol_codes() {
                let mapped = map_symbol(&code);
                assert!(!mapped.is_unknown(), "{code} should be known");
                assert_eq!(mapped.text, condition.text());
            }
        }
    }

    #[test]
    fn legacy_thunder_spelling_is_recognised() {
        assert_eq!(map_symbol("rain_thunder").text, "Rain with Thunder");
        assert_eq!(
            map_symbol("heavyrainshowers_night_thunder").text,
            "Heavy Rain Showers with Thunder"
        );
        assert_eq!(
            map_symbol("rainshowersandthunder_day"),
            map_symbol("rainshowers_day_thunder")
        );
    }

    #[test]
    fn provider_vocabulary_is_covered() {
        let vocabulary = [
            "clearsky_day", "fair_night", "partlycloudy_polartwilight", "cloudy", "fog",
            "lightrain", "rain", "heavyrain", "lightsleet", "sleet", "heavysleet",
            "lightsnow", "snow", "heavysnow", "lightrainshowers_day", "rainshowers_night",
            "heavyrainshowers_polartwilight", "lightsleetshowers_day", "sleetshowers_night",
            "heavysleetshowers_day", "lightsnowshowers_night", "snowshowers_day",
            "heavysnowshowers_night", "lightrainandthunder", "rainandthunder",
            "heavyrainandthunder", "lightsleetandthunder", "sleetandthunder",
            "heavysleetandthunder", "lightsnowandthunder", "snowandthunder",
            "heavysnowandthunder", "lightrainshowersandthunder_day",
            "rainshowersandthunder_night", "heavyrainshowersandthunder_polartwilight",
            "lightsleetshowersandthunder_day", "sleetshowersandthunder_night",
            "heavysleetshowersandthunder_day", "lightsnowshowersandthunder_night",
            "snowshowersandthunder_day", "heavysnowshowersandthunder_night",
        ];
        for code in vocabulary {
            assert!(!map_symbol(code).is_unknown(), "{code} should be known");
        }
    }

    #[test]
    fn unrecognised_symbols_fall_back_to_unknown() {
        for code in ["", "_", "sunny", "clearsky_day_extra", "tornado_thunder_day_x", "🌧"] {
            assert_eq!(map_symbol(code), NormalizedCondition::unknown(), "{code:?}");
        }
    }

    #[test]
    fn mapping_tolerates_case_and_whitespace() {
        assert_eq!(map_symbol("  Cloudy ").text, "Cloudy");
    }

    #[test]
    fn base_symbols_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for c in Condition::ALL {
            assert!(seen.insert(c.base_symbol()), "{} duplicated", c.base_symbol());
        }
    }
}
