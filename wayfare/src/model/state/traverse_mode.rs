use serde::{Deserialize, Serialize};
use wayfare_timetable::pattern::TransitMode;

/// how a traveler is moving along an edge.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TraverseMode {
    #[default]
    Walk,
    Bicycle,
    Scooter,
    Car,
    Transit(TransitMode),
}

impl TraverseMode {
    pub fn is_transit(&self) -> bool {
        matches!(self, TraverseMode::Transit(_))
    }

    pub fn is_driving(&self) -> bool {
        matches!(self, TraverseMode::Car)
    }

    /// modes that use the bicycle permission of a street and can be walked
    /// along pedestrian-only edges.
    pub fn is_cycling(&self) -> bool {
        matches!(self, TraverseMode::Bicycle | TraverseMode::Scooter)
    }
}

impl std::fmt::Display for TraverseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraverseMode::Walk => write!(f, "walk"),
            TraverseMode::Bicycle => write!(f, "bicycle"),
            TraverseMode::Scooter => write!(f, "scooter"),
            TraverseMode::Car => write!(f, "car"),
            TraverseMode::Transit(mode) => write!(f, "transit ({mode:?})"),
        }
    }
}
