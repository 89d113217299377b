//! Recommendation entry point: adapter first, local rule on any failure.

use wearcast_weather::is_rainy;

use crate::client::{AssistantClient, AssistantError};
use crate::fallback::local_recommendation;
use crate::scene::Scene;
use crate::types::{AdviceRequest, Outfit, Recommendation};

const BASE_CONFIDENCE: f64 = 0.7;

/// Ask the adapter for advice and score it; degrade to the local rule when
/// the adapter errors or proposes nothing wearable.
pub async fn recommend(client: &AssistantClient, request: &AdviceRequest) -> Recommendation {
    match client.outfit_advice(request).await {
        Ok(payload) => {
            let outfits: Vec<Outfit> = payload
                .outfits
                .into_iter()
                .filter(|o| !o.is_empty())
                .map(|mut outfit| {
                    outfit.confidence =
                        score_confidence(request.scene, &request.weather, &outfit);
                    outfit
                })
                .collect();

            if outfits.is_empty() {
                tracing::warn!("assistant proposed no wearable outfits; using local rule");
                return local_recommendation(request.temperature, &request.weather, request.scene);
            }

            let mut recommendation = local_recommendation(
                request.temperature,
                &request.weather,
                request.scene,
            );
            recommendation.outfits = outfits;
            if !payload.reasons.is_empty() {
                recommendation.reasons = payload.reasons;
            }
            if !payload.tips.is_empty() {
                recommendation.tips = payload.tips;
            }
            recommendation
        }
        Err(e) => {
            log_degrade(&e);
            local_recommendation(request.temperature, &request.weather, request.scene)
        }
    }
}

fn log_degrade(error: &AssistantError) {
    tracing::warn!(error = %error, "assistant unavailable; using local rule");
}

/// Rule-based confidence for a proposed outfit.
///
/// Starts at 0.7; the office rewards shirts and suits, workouts reward
/// athletic wear, and an umbrella on a rainy day earns a small bump. Clamped
/// to 0-1.
pub fn score_confidence(scene: Scene, weather: &str, outfit: &Outfit) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    let top_has = |needles: &[&str]| {
        outfit.top.iter().any(|item| {
            let item = item.to_lowercase();
            needles.iter().any(|n| item.contains(n))
        })
    };

    match scene {
        Scene::Work => {
            confidence += if top_has(&["shirt", "suit", "blazer"]) { 0.2 } else { -0.1 };
        }
        Scene::Sports => {
            confidence += if top_has(&["athletic", "sport", "jersey", "training"]) {
                0.2
            } else {
                -0.1
            };
        }
        _ => {}
    }

    if is_rainy(weather) && outfit.accessories.iter().any(|a| a.to_lowercase().contains("umbrella"))
    {
        confidence += 0.1;
    }

    confidence.clamp(0.0, 1.0)
}
