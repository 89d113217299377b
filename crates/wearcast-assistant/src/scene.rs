use serde::{Deserialize, Serialize};

/// The context an outfit is for. Biases both the prompt and the confidence
/// scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    Work,
    Dating,
    Sports,
    Travel,
    Party,
    Interview,
    #[default]
    Casual,
}

impl Scene {
    pub fn description(self) -> &'static str {
        match self {
            Self::Work => "the office",
            Self::Dating => "a date",
            Self::Sports => "a workout",
            Self::Travel => "traveling",
            Self::Party => "a party",
            Self::Interview => "an interview",
            Self::Casual => "everyday wear",
        }
    }

    pub fn all() -> [Scene; 7] {
        [
            Self::Work,
            Self::Dating,
            Self::Sports,
            Self::Travel,
            Self::Party,
            Self::Interview,
            Self::Casual,
        ]
    }
}
