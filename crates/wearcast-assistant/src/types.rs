use serde::{Deserialize, Serialize};

use crate::scene::Scene;

fn default_confidence() -> f64 {
    0.7
}

/// One proposed outfit, scored 0-1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Outfit {
    #[serde(default)]
    pub top: Vec<String>,
    #[serde(default)]
    pub bottom: Vec<String>,
    #[serde(default)]
    pub shoes: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl Outfit {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
            && self.bottom.is_empty()
            && self.shoes.is_empty()
            && self.accessories.is_empty()
    }
}

/// What the caller knows when asking for advice.
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub temperature: f64,
    pub weather: String,
    pub scene: Scene,
    /// User preference names, free-form.
    pub preferences: Vec<String>,
    /// Condensed outfit history (one garment per past day).
    pub history: Vec<String>,
}

/// A complete recommendation: outfits plus the reasoning and tips shown
/// alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub scene: Scene,
    pub temperature: f64,
    pub weather: String,
    pub outfits: Vec<Outfit>,
    pub reasons: Vec<String>,
    pub tips: Vec<String>,
}
