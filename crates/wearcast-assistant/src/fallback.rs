//! The deterministic local recommendation.
//!
//! This is the one guarantee in the recommendation path: same inputs, same
//! output, and it cannot fail. Whatever the adapter does, the caller can
//! always show a non-empty outfit with reasons and tips.

use wearcast_weather::is_rainy;

use crate::scene::Scene;
use crate::types::{Outfit, Recommendation};

const FALLBACK_CONFIDENCE: f64 = 0.7;

/// Fixed outfit plus reasons and tips derived only from the temperature
/// thresholds and a rain check. Total over any input.
pub fn local_recommendation(temperature: f64, weather: &str, scene: Scene) -> Recommendation {
    let outfit = Outfit {
        top: vec!["white tee".to_string()],
        bottom: vec!["jeans".to_string()],
        shoes: vec!["sneakers".to_string()],
        accessories: Vec::new(),
        confidence: FALLBACK_CONFIDENCE,
    };

    let mut reasons = vec![
        format!("Currently {temperature}°C with {weather}"),
        format!("A safe baseline for {}", scene.description()),
    ];
    if is_rainy(weather) {
        reasons.push("Carry an umbrella".to_string());
    }

    let mut tips = Vec::new();
    if temperature < 10.0 {
        tips.push("It's cold out; add warm layers".to_string());
    } else if temperature > 30.0 {
        tips.push("It's hot; favor light, breathable fabrics".to_string());
    }
    tips.push(scene_tip(scene).to_string());

    Recommendation {
        scene,
        temperature,
        weather: weather.to_string(),
        outfits: vec![outfit],
        reasons,
        tips,
    }
}

fn scene_tip(scene: Scene) -> &'static str {
    match scene {
        Scene::Work => "Keep the look polished and professional",
        Scene::Dating => "A slightly dressier touch works well",
        Scene::Sports => "Pick technical fabrics and mind breathability",
        Scene::Travel => "Comfort first; layers handle changing conditions",
        Scene::Party => "Something with a bit of personality fits the mood",
        Scene::Interview => "Stay conservative; let the conversation stand out",
        Scene::Casual => "Wear whatever feels comfortable",
    }
}
