//! Clothing, food and health suggestions derived from condition text and temperature.

use serde::Serialize;

const MAX_SUGGESTIONS: usize = 3;
const MAX_MEDICAL_TIPS: usize = 4;

/// Icon attached to a suggestion; resolved once, rendered by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionIcon {
    Shirt,
    Wind,
    Umbrella,
    CloudSun,
    CloudSnow,
    Coffee,
    GlassWater,
    CookingPot,
    Utensils,
    HeartPulse,
    Thermometer,
    Activity,
    Siren,
    Cloudy,
    Sun,
    Snowflake,
    Zap,
    Unknown,
}

impl SuggestionIcon {
    /// Terminal rendering of the icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Shirt => "👕",
            Self::Wind => "🌬",
            Self::Umbrella => "☂",
            Self::CloudSun => "⛅",
            Self::CloudSnow => "🌨",
            Self::Coffee => "☕",
            Self::GlassWater => "🥤",
            Self::CookingPot => "🍲",
            Self::Utensils => "🍴",
            Self::HeartPulse => "❤",
            Self::Thermometer => "🌡",
            Self::Activity => "🏃",
            Self::Siren => "🚨",
            Self::Cloudy => "☁",
            Self::Sun => "☀",
            Self::Snowflake => "❄",
            Self::Zap => "⚡",
            Self::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub item: &'static str,
    pub icon: SuggestionIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TipCategory {
    General,
    #[serde(rename = "Flu/Cough")]
    FluCough,
    Heatstroke,
    #[serde(rename = "Cold Weather")]
    ColdWeather,
}

impl TipCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::FluCough => "Flu/Cough",
            Self::Heatstroke => "Heatstroke",
            Self::ColdWeather => "Cold Weather",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicalTip {
    pub tip: &'static str,
    pub icon: SuggestionIcon,
    pub category: TipCategory,
}

/// Input shared by every rule: lowercased condition text and temperature.
struct Weather {
    condition: String,
    temp_c: f64,
}

impl Weather {
    fn new(condition: &str, temp_c: f64) -> Self {
        Self {
            condition: condition.to_lowercase(),
            temp_c,
        }
    }

    fn mentions(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.condition.contains(w))
    }
}

struct Rule<T: 'static> {
    when: fn(&Weather) -> bool,
    items: &'static [T],
}

use SuggestionIcon as I;

const CLOTHING_RULES: &[Rule<Suggestion>] = &[
    Rule {
        when: |w| w.mentions(&["rain", "drizzle"]),
        items: &[Suggestion { item: "Raincoat & Umbrella", icon: I::Umbrella }],
    },
    Rule {
        when: |w| w.mentions(&["snow", "blizzard", "sleet"]),
        items: &[Suggestion { item: "Heavy winter coat, gloves, hat, and scarf", icon: I::CloudSnow }],
    },
    Rule {
        when: |w| w.temp_c > 25.0,
        items: &[
            Suggestion { item: "Light cotton wear, shorts", icon: I::Shirt },
            Suggestion { item: "Sunglasses and Hat", icon: I::CloudSun },
        ],
    },
    Rule {
        when: |w| w.temp_c > 15.0 && w.temp_c <= 25.0,
        items: &[Suggestion { item: "Light jacket or sweater", icon: I::Shirt }],
    },
    Rule {
        when: |w| w.temp_c > 5.0 && w.temp_c <= 15.0,
        items: &[
            Suggestion { item: "Warm jacket or coat", icon: I::Shirt },
            Suggestion { item: "Consider layers", icon: I::Shirt },
        ],
    },
    Rule {
        when: |w| w.temp_c <= 5.0,
        items: &[Suggestion { item: "Woolen jacket, thermal wear", icon: I::CloudSnow }],
    },
    // Snow already brought gloves and a hat.
    Rule {
        when: |w| w.temp_c <= 5.0 && !w.mentions(&["snow"]),
        items: &[Suggestion { item: "Gloves and beanie", icon: I::CloudSnow }],
    },
];

const CLOTHING_FALLBACK: Suggestion = Suggestion {
    item: "Dress according to temperature and personal comfort.",
    icon: I::Shirt,
};

const FOOD_RULES: &[Rule<Suggestion>] = &[
    Rule {
        when: |w| w.temp_c > 25.0,
        items: &[
            Suggestion { item: "Fresh juices, smoothies, and ice cream", icon: I::GlassWater },
            Suggestion { item: "Light salads and fruits", icon: I::Utensils },
        ],
    },
    Rule {
        when: |w| w.temp_c <= 25.0 && (w.temp_c <= 10.0 || w.mentions(&["rain", "snow"])),
        items: &[
            Suggestion { item: "Hot soup, stews, and broths", icon: I::CookingPot },
            Suggestion { item: "Warm beverages like tea or coffee", icon: I::Coffee },
            Suggestion { item: "Ginger and herbal teas", icon: I::Coffee },
        ],
    },
    Rule {
        when: |w| w.temp_c > 10.0 && w.temp_c <= 25.0 && !w.mentions(&["rain", "snow"]),
        items: &[
            Suggestion { item: "Comfort food like pasta or rice dishes", icon: I::Utensils },
            Suggestion { item: "Seasonal fruits and vegetables", icon: I::Utensils },
        ],
    },
];

const FOOD_FALLBACK: Suggestion = Suggestion {
    item: "Enjoy a balanced meal suitable for the day!",
    icon: I::Utensils,
};

const fn tip(tip: &'static str, icon: SuggestionIcon, category: TipCategory) -> MedicalTip {
    MedicalTip { tip, icon, category }
}

const MEDICAL_RULES: &[Rule<MedicalTip>] = &[
    Rule {
        when: |_| true,
        items: &[
            tip("Wash hands frequently to prevent spread of germs.", I::HeartPulse, TipCategory::General),
            tip("Ensure you get adequate sleep for better immunity.", I::Activity, TipCategory::General),
        ],
    },
    Rule {
        when: |w| w.temp_c > 28.0 || w.mentions(&["sunny"]),
        items: &[
            tip("Stay hydrated: drink plenty of water throughout the day.", I::GlassWater, TipCategory::Heatstroke),
            tip(
                "Avoid prolonged sun exposure, especially during peak hours (10 AM - 4 PM).",
                I::Sun,
                TipCategory::Heatstroke,
            ),
            tip("Wear sunscreen with high SPF to protect your skin.", I::Sun, TipCategory::Heatstroke),
            tip(
                "Recognize heatstroke symptoms: dizziness, nausea, rapid pulse. Seek shade and cool down if affected.",
                I::Thermometer,
                TipCategory::Heatstroke,
            ),
        ],
    },
    Rule {
        when: |w| w.temp_c < 10.0 || w.mentions(&["snow", "cold"]),
        items: &[
            tip("Keep warm to avoid hypothermia. Dress in layers.", I::Snowflake, TipCategory::ColdWeather),
            tip("Be cautious of icy surfaces to prevent falls.", I::Activity, TipCategory::ColdWeather),
            tip("Ensure indoor heating is safe and well-ventilated.", I::Siren, TipCategory::ColdWeather),
        ],
    },
    Rule {
        when: |w| w.temp_c < 15.0 || w.mentions(&["rain", "humidity"]),
        items: &[
            tip(
                "Be mindful of flu/cough symptoms. Cover your mouth when coughing/sneezing.",
                I::Thermometer,
                TipCategory::FluCough,
            ),
            tip("Gargle with warm salt water for a sore throat.", I::GlassWater, TipCategory::FluCough),
            tip("Boost immunity with vitamin C rich foods.", I::Utensils, TipCategory::FluCough),
        ],
    },
];

const MEDICAL_FALLBACK: MedicalTip = tip(
    "Maintain a balanced diet and exercise regularly for overall health.",
    I::Activity,
    TipCategory::General,
);

/// Every item of every matching rule, in table order.
fn matching<T: Clone + 'static>(rules: &[Rule<T>], weather: &Weather) -> Vec<T> {
    rules
        .iter()
        .filter(|rule| (rule.when)(weather))
        .flat_map(|rule| rule.items.iter().cloned())
        .collect()
}

fn dedup_by_item(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut unique: Vec<Suggestion> = Vec::with_capacity(suggestions.len());
    for s in suggestions {
        if !unique.iter().any(|u| u.item == s.item) {
            unique.push(s);
        }
    }
    unique
}

fn finish(mut suggestions: Vec<Suggestion>, fallback: Suggestion) -> Vec<Suggestion> {
    if suggestions.is_empty() {
        suggestions.push(fallback);
    }
    let mut unique = dedup_by_item(suggestions);
    unique.truncate(MAX_SUGGESTIONS);
    unique
}

pub fn clothing_suggestions(condition: &str, temp_c: f64) -> Vec<Suggestion> {
    let weather = Weather::new(condition, temp_c);
    finish(matching(CLOTHING_RULES, &weather), CLOTHING_FALLBACK)
}

pub fn food_suggestions(condition: &str, temp_c: f64) -> Vec<Suggestion> {
    let weather = Weather::new(condition, temp_c);
    finish(matching(FOOD_RULES, &weather), FOOD_FALLBACK)
}

pub fn medical_tips(condition: &str, temp_c: f64) -> Vec<MedicalTip> {
    let weather = Weather::new(condition, temp_c);
    let mut tips = matching(MEDICAL_RULES, &weather);
    if tips.len() < 3 {
        tips.push(MEDICAL_FALLBACK);
    }
    tips.truncate(MAX_MEDICAL_TIPS);
    tips
}

/// Icon for a condition text, by keyword.
pub fn icon_for_condition(condition: &str) -> SuggestionIcon {
    let weather = Weather::new(condition, 0.0);
    let table: [(&[&str], SuggestionIcon); 6] = [
        (&["sunny", "clear"], I::Sun),
        (&["cloudy", "overcast"], I::Cloudy),
        (&["rain", "drizzle"], I::Umbrella),
        (&["snow", "blizzard", "ice pellets"], I::Snowflake),
        (&["thunder"], I::Zap),
        (&["mist", "fog"], I::Wind),
    ];

    table
        .into_iter()
        .find(|(words, _)| weather.mentions(words))
        .map(|(_, icon)| icon)
        .unwrap_or(I::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(s: &[Suggestion]) -> Vec<&str> {
        s.iter().map(|s| s.item).collect()
    }

    #[test]
    fn rainy_mild_day_clothing() {
        let s = clothing_suggestions("Light Rain", 18.0);
        assert_eq!(items(&s), vec!["Raincoat & Umbrella", "Light jacket or sweater"]);
    }

    #[test]
    fn hot_day_clothing() {
        let s = clothing_suggestions("Clear Sky", 30.0);
        assert_eq!(items(&s), vec!["Light cotton wear, shorts", "Sunglasses and Hat"]);
        assert_eq!(s[1].icon, SuggestionIcon::CloudSun);
    }

    #[test]
    fn clothing_is_capped_at_three() {
        let s = clothing_suggestions("Heavy Rain and Sleet", 10.0);
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].item, "Raincoat & Umbrella");
        assert_eq!(s[1].item, "Heavy winter coat, gloves, hat, and scarf");
    }

    #[test]
    fn cold_without_snow_adds_gloves() {
        let s = clothing_suggestions("Cloudy", -2.0);
        assert_eq!(items(&s), vec!["Woolen jacket, thermal wear", "Gloves and beanie"]);

        let snowy = clothing_suggestions("Snow", -2.0);
        assert!(!items(&snowy).contains(&"Gloves and beanie"));
    }

    #[test]
    fn suggestions_are_unique() {
        for temp in [-10.0, 0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0] {
            for cond in ["Rain", "Snow", "Clear Sky", "Sleet with rain"] {
                let s = clothing_suggestions(cond, temp);
                let mut seen = std::collections::HashSet::new();
                assert!(s.iter().all(|x| seen.insert(x.item)), "{cond} {temp}");
                assert!(!s.is_empty() && s.len() <= 3);
            }
        }
    }

    #[test]
    fn food_by_temperature_band() {
        assert_eq!(food_suggestions("Clear Sky", 30.0)[0].item, "Fresh juices, smoothies, and ice cream");
        assert_eq!(food_suggestions("Cloudy", 5.0).len(), 3);
        assert_eq!(food_suggestions("Rain", 20.0)[0].item, "Hot soup, stews, and broths");
        assert_eq!(
            items(&food_suggestions("Partly Cloudy", 20.0)),
            vec!["Comfort food like pasta or rice dishes", "Seasonal fruits and vegetables"]
        );
    }

    #[test]
    fn medical_tips_start_with_general_and_cap_at_four() {
        let tips = medical_tips("Snow", -5.0);
        assert_eq!(tips.len(), 4);
        assert_eq!(tips[0].category, TipCategory::General);
        assert_eq!(tips[1].category, TipCategory::General);
        assert_eq!(tips[2].category, TipCategory::ColdWeather);
    }

    #[test]
    fn heat_tips_on_hot_days() {
        let tips = medical_tips("Clear Sky", 32.0);
        assert_eq!(tips[2].category, TipCategory::Heatstroke);
    }

    #[test]
    fn mild_day_gets_fallback_tip() {
        let tips = medical_tips("Partly Cloudy", 20.0);
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[2], MEDICAL_FALLBACK);
    }

    #[test]
    fn condition_icons() {
        assert_eq!(icon_for_condition("Clear Sky"), SuggestionIcon::Sun);
        assert_eq!(icon_for_condition("Partly Cloudy"), SuggestionIcon::Cloudy);
        assert_eq!(icon_for_condition("Light Rain"), SuggestionIcon::Umbrella);
        assert_eq!(icon_for_condition("Heavy Snow"), SuggestionIcon::Snowflake);
        assert_eq!(icon_for_condition("Fog"), SuggestionIcon::Wind);
        assert_eq!(icon_for_condition("Unknown"), SuggestionIcon::Unknown);
        // Rain is matched before thunder.
        assert_eq!(icon_for_condition("Rain with Thunder"), SuggestionIcon::Umbrella);
    }
}
