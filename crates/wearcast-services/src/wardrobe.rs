//! Clothing rules and suggestions.
//!
//! A static rule table maps temperature bands to garments; the layered
//! builder composes base/mid/outer advice plus weather add-ons. Custom rules
//! the user defines are persisted alongside.

use serde::{Deserialize, Serialize};

use wearcast_store::{events, DocStore, Document, StoreContext};
use wearcast_weather::{is_rainy, is_snowy, is_windy};

/// Garment suggestions grouped the way the wardrobe view renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutfitSuggestions {
    pub tops: Vec<String>,
    pub bottoms: Vec<String>,
    pub shoes: Vec<String>,
    pub accessories: Vec<String>,
}

/// One row of the rule table. `None` bounds are unbounded; a rule matches
/// when `min < temperature <= max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingRule {
    pub id: String,
    pub min_temp: Option<i32>,
    pub max_temp: Option<i32>,
    pub weather: Vec<String>,
    pub suggestions: OutfitSuggestions,
}

impl ClothingRule {
    pub fn matches(&self, temperature: i32) -> bool {
        self.min_temp.map_or(true, |min| temperature > min)
            && self.max_temp.map_or(true, |max| temperature <= max)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The built-in rule table, checked in order. Not persisted; user-defined
/// rules live in their own store key.
pub fn default_rules() -> Vec<ClothingRule> {
    vec![
        ClothingRule {
            id: "1".to_string(),
            min_temp: None,
            max_temp: Some(5),
            weather: strings(&["晴", "多云", "阴"]),
            suggestions: OutfitSuggestions {
                tops: strings(&["down jacket", "thermal base layer"]),
                bottoms: strings(&["thermal trousers", "heavy jeans"]),
                shoes: strings(&["insulated boots", "fleece-lined sneakers"]),
                accessories: strings(&["scarf", "gloves", "beanie"]),
            },
        },
        ClothingRule {
            id: "2".to_string(),
            min_temp: Some(5),
            max_temp: Some(15),
            weather: strings(&["晴", "多云", "阴"]),
            suggestions: OutfitSuggestions {
                tops: strings(&["heavy coat", "sweater"]),
                bottoms: strings(&["jeans", "casual trousers"]),
                shoes: strings(&["sneakers", "casual shoes"]),
                accessories: strings(&["scarf"]),
            },
        },
        ClothingRule {
            id: "3".to_string(),
            min_temp: Some(15),
            max_temp: Some(25),
            weather: strings(&["晴", "多云", "阴"]),
            suggestions: OutfitSuggestions {
                tops: strings(&["light jacket", "long-sleeve shirt"]),
                bottoms: strings(&["casual trousers", "jeans"]),
                shoes: strings(&["sneakers", "canvas shoes"]),
                accessories: vec![],
            },
        },
        ClothingRule {
            id: "4".to_string(),
            min_temp: Some(25),
            max_temp: None,
            weather: strings(&["晴", "多云", "阴"]),
            suggestions: OutfitSuggestions {
                tops: strings(&["tee", "short-sleeve shirt"]),
                bottoms: strings(&["shorts", "casual trousers"]),
                shoes: strings(&["sandals", "canvas shoes"]),
                accessories: strings(&["sun hat", "sunglasses"]),
            },
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeasonBand {
    Cold,
    Mild,
    Hot,
}

fn season_band(temperature: i32) -> SeasonBand {
    if temperature <= 10 {
        SeasonBand::Cold
    } else if temperature <= 25 {
        SeasonBand::Mild
    } else {
        SeasonBand::Hot
    }
}

/// Three-layer dressing advice plus weather add-ons and an activity line.
/// Never empty.
fn layered_suggestions(temperature: i32, weather: &str) -> Vec<String> {
    let band = season_band(temperature);

    let base = match band {
        SeasonBand::Cold => "thermal base layer or thermal leggings",
        SeasonBand::Mild => "moisture-wicking base layer or a light undershirt",
        SeasonBand::Hot => "quick-dry base layer or a light breathable undershirt",
    };
    let mid = match band {
        SeasonBand::Cold => Some("wool sweater or fleece jacket"),
        SeasonBand::Mild => Some("long-sleeve tee or a light sweater"),
        // Hot days skip the mid layer entirely.
        SeasonBand::Hot => None,
    };
    let outer = match band {
        SeasonBand::Cold => "down jacket or a heavy coat",
        SeasonBand::Mild => "light jacket or a windbreaker",
        SeasonBand::Hot => "sun-protection shirt or a light windbreaker",
    };

    let mut suggestions = Vec::new();
    suggestions.push(format!("Base layer (wicking): {base}"));
    if let Some(mid) = mid {
        suggestions.push(format!("Mid layer (warmth): {mid}"));
    }
    suggestions.push(format!("Outer layer (protection): {outer}"));

    if is_rainy(weather) {
        suggestions.push("Add a waterproof layer: rain jacket or waterproof shell".to_string());
    }
    if is_windy(weather) {
        suggestions.push("Pick an outer layer with good wind resistance".to_string());
    }
    if temperature >= 28 {
        suggestions.push("Sun protection: apply sunscreen and wear a sun hat".to_string());
    }
    if temperature <= 5 {
        suggestions.push("Keep warm: add a hat, scarf and gloves".to_string());
    }

    suggestions.push(activity_suggestion(temperature, weather).to_string());
    suggestions
}

fn activity_suggestion(temperature: i32, weather: &str) -> &'static str {
    if is_rainy(weather) || is_snowy(weather) {
        return "Outdoor activity is not advised today; plan something indoors";
    }
    if temperature >= 35 || temperature <= 0 {
        return "Avoid strenuous exercise; guard against the heat or cold";
    }
    if (15..=25).contains(&temperature) {
        return "Great weather for outdoor activity";
    }
    "Fine for moderate outdoor activity with the right protection"
}

/// Full suggestion list for the home view: the layered advice, with the
/// matching rule's accessories appended when it has any.
pub fn clothing_suggestions(temperature: i32, weather: &str) -> Vec<String> {
    let mut suggestions = layered_suggestions(temperature, weather);

    let rules = default_rules();
    let Some(rule) = rules.iter().find(|r| r.matches(temperature)) else {
        return suggestions;
    };
    if !rule.suggestions.accessories.is_empty() {
        suggestions.push(format!(
            "Suggested accessories: {}",
            rule.suggestions.accessories.join(", ")
        ));
    }
    suggestions
}

/// The one-line version shown next to the current temperature.
pub fn quick_suggestion(temperature: i32) -> &'static str {
    if temperature >= 30 {
        "Hot out there; wear light, breathable clothing"
    } else if temperature >= 20 {
        "Pleasant temperature; short sleeves or a thin jacket will do"
    } else if temperature >= 10 {
        "On the cool side; bring a long-sleeve jacket"
    } else {
        "Cold today; dress warmly"
    }
}

/// Newtype wrapper so [`Document`] can be implemented for the rule list
/// without violating the orphan rule (`Document` and `Vec` are both foreign
/// to this crate). Serializes identically to `Vec<ClothingRule>`.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
struct ClothingRuleList(Vec<ClothingRule>);

impl Document for ClothingRuleList {
    const KEY: &'static str = "wearcast-clothing-rules";
    const EVENT: &'static str = events::CLOTHING_RULES_UPDATED;
    const VERSION: u32 = 1;

    fn default_value() -> Self {
        Self(Vec::new())
    }
}

/// User-defined rules, kept separate from the built-in table.
pub struct ClothingRuleRepository {
    docs: DocStore<ClothingRuleList>,
}

impl ClothingRuleRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { docs: DocStore::new(ctx) }
    }

    pub fn list(&self) -> Vec<ClothingRule> {
        self.docs.load().0
    }

    pub fn add(&self, rule: ClothingRule) {
        let mut rules = self.docs.load();
        rules.0.push(rule);
        self.docs.save(&rules);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_rule_table_covers_every_temperature() {
        let rules = default_rules();
        for temp in -40..=45 {
            assert!(
                rules.iter().any(|r| r.matches(temp)),
                "no rule matched {temp}"
            );
        }
    }

    #[test]
    fn test_rule_bands_are_exclusive_at_boundaries() {
        let rules = default_rules();
        // 5 falls in the first band (min < t <= max), 6 in the second.
        assert!(rules[0].matches(5));
        assert!(!rules[1].matches(5));
        assert!(rules[1].matches(6));
        assert!(rules[3].matches(26));
        assert!(!rules[2].matches(26));
    }

    #[test]
    fn test_cold_day_gets_all_three_layers_and_warm_extras() {
        let suggestions = clothing_suggestions(-3, "晴");
        assert!(suggestions.iter().any(|s| s.starts_with("Base layer")));
        assert!(suggestions.iter().any(|s| s.starts_with("Mid layer")));
        assert!(suggestions.iter().any(|s| s.starts_with("Outer layer")));
        assert!(suggestions.iter().any(|s| s.contains("hat, scarf and gloves")));
        assert!(suggestions.iter().any(|s| s.contains("accessories")));
    }

    #[test]
    fn test_hot_day_skips_mid_layer_and_adds_sun_advice() {
        let suggestions = clothing_suggestions(32, "晴");
        assert!(!suggestions.iter().any(|s| s.starts_with("Mid layer")));
        assert!(suggestions.iter().any(|s| s.contains("sunscreen")));
    }

    #[test]
    fn test_rain_adds_waterproof_layer_and_indoor_advice() {
        let suggestions = clothing_suggestions(18, "小雨");
        assert!(suggestions.iter().any(|s| s.contains("waterproof")));
        assert!(suggestions.iter().any(|s| s.contains("indoors")));
    }

    #[test]
    fn test_mild_clear_day_recommends_outdoor_activity() {
        let suggestions = clothing_suggestions(20, "晴");
        assert!(suggestions.iter().any(|s| s.contains("Great weather")));
    }

    #[test]
    fn test_suggestions_never_empty() {
        for temp in [-30, -5, 0, 10, 20, 28, 40] {
            for weather in ["晴", "小雨", "雪", "大风", "", "whatever"] {
                assert!(!clothing_suggestions(temp, weather).is_empty());
            }
        }
    }

    #[test]
    fn test_quick_suggestion_thresholds() {
        assert!(quick_suggestion(35).contains("breathable"));
        assert!(quick_suggestion(25).contains("short sleeves"));
        assert!(quick_suggestion(15).contains("long-sleeve"));
        assert!(quick_suggestion(5).contains("warmly"));
    }

    #[test]
    fn test_custom_rules_roundtrip() {
        let repo = ClothingRuleRepository::new(StoreContext::in_memory());
        assert!(repo.list().is_empty());

        repo.add(ClothingRule {
            id: "custom-1".to_string(),
            min_temp: Some(18),
            max_temp: Some(22),
            weather: vec!["晴".to_string()],
            suggestions: OutfitSuggestions {
                tops: strings(&["linen shirt"]),
                ..OutfitSuggestions::default()
            },
        });

        let rules = repo.list();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].suggestions.tops, vec!["linen shirt"]);
    }
}
