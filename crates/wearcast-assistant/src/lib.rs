//! Outfit recommendations.
//!
//! An OpenAI-compatible chat adapter proposes outfits; when it fails for any
//! reason the deterministic local rule takes over, so a recommendation is
//! always produced.

pub mod client;
pub mod fallback;
pub mod recommend;
pub mod scene;
pub mod types;

pub use client::{AdvicePayload, AssistantClient, AssistantError, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use fallback::local_recommendation;
pub use recommend::{recommend, score_confidence};
pub use scene::Scene;
pub use types::{AdviceRequest, Outfit, Recommendation};
